use std::fmt;

use chrono::{Month, Weekday};

use super::model::{month_label, weekday_label, City, Trip};

// ---------------------------------------------------------------------------
// Period – a month/day filter value or the "all" sentinel
// ---------------------------------------------------------------------------

/// Either no constraint (`All`) or a single month/weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Period<T> {
    /// Whether `value` passes this filter.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Period::All => true,
            Period::Only(wanted) => wanted == value,
        }
    }
}

impl<T: Copy> Period<T> {
    /// `"all"` followed by every named value, for use as prompt options.
    pub fn choices(named: &[(&'static str, T)]) -> Vec<(&'static str, Period<T>)> {
        std::iter::once(("all", Period::All))
            .chain(named.iter().map(|&(name, value)| (name, Period::Only(value))))
            .collect()
    }
}

impl fmt::Display for Period<Month> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => f.write_str("all"),
            Period::Only(m) => f.write_str(&month_label(*m).to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for Period<Weekday> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::All => f.write_str("all"),
            Period::Only(d) => f.write_str(&weekday_label(*d).to_ascii_lowercase()),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterSelection – what one session iteration analyses
// ---------------------------------------------------------------------------

/// Fully resolved (city, month, day) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    pub month: Period<Month>,
    pub day: Period<Weekday>,
}

impl FilterSelection {
    /// Selection covering every trip of `city`.
    pub fn unfiltered(city: City) -> Self {
        Self {
            city,
            month: Period::All,
            day: Period::All,
        }
    }

    /// Whether a trip passes both the month and the day filter.
    pub fn matches(&self, trip: &Trip) -> bool {
        self.month.admits(&trip.month) && self.day.admits(&trip.weekday)
    }
}

/// Keep only the trips that pass `selection`, preserving file order.
///
/// With both filters at [`Period::All`] the input is returned untouched.
pub fn apply(trips: Vec<Trip>, selection: &FilterSelection) -> Vec<Trip> {
    if selection.month == Period::All && selection.day == Period::All {
        return trips;
    }
    let before = trips.len();
    let kept: Vec<Trip> = trips
        .into_iter()
        .filter(|trip| selection.matches(trip))
        .collect();
    log::debug!(
        "Filter month={} day={} kept {} of {before} trips",
        selection.month,
        selection.day,
        kept.len()
    );
    kept
}
