use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

// ---------------------------------------------------------------------------
// City – the closed set of cities with a dataset on disk
// ---------------------------------------------------------------------------

/// A city whose trip data can be explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// Every city, in the order they are offered to the user.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// File name of the city's dataset inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// CityCatalog – city → backing file
// ---------------------------------------------------------------------------

/// Fixed mapping from city to dataset path, rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CityCatalog {
    data_dir: PathBuf,
}

impl CityCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the dataset for `city`.
    pub fn path_for(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }

    /// Prompt names of all cities paired with the city they select.
    pub fn choices(&self) -> Vec<(&'static str, City)> {
        City::ALL.iter().map(|&c| (c.name(), c)).collect()
    }
}

impl Default for CityCatalog {
    fn default() -> Self {
        Self::new(".")
    }
}

// ---------------------------------------------------------------------------
// Month / weekday names – fixed English tables, independent of host locale
// ---------------------------------------------------------------------------

/// Prompt answers for each month, mapped to the value they select.
pub const MONTHS: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// Prompt answers for each weekday starting from Sunday, matching the prompt order.
pub const WEEKDAYS: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

/// Capitalised English month name ("June").
pub fn month_label(month: Month) -> &'static str {
    month.name()
}

/// Capitalised English weekday name ("Tuesday").
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

// ---------------------------------------------------------------------------
// DatasetSchema – which columns a city file carries
// ---------------------------------------------------------------------------

/// Column layout of a city file, chosen from its column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSchema {
    /// start_time … user_type (6 columns).
    Basic,
    /// Basic plus gender and birth_year (8 columns).
    Extended,
}

impl DatasetSchema {
    pub const BASIC_COLUMNS: [&'static str; 6] = [
        "start_time",
        "end_time",
        "trip_duration",
        "start_station",
        "end_station",
        "user_type",
    ];

    pub const EXTENDED_COLUMNS: [&'static str; 8] = [
        "start_time",
        "end_time",
        "trip_duration",
        "start_station",
        "end_station",
        "user_type",
        "gender",
        "birth_year",
    ];

    pub fn from_column_count(n: usize) -> Option<Self> {
        match n {
            6 => Some(DatasetSchema::Basic),
            8 => Some(DatasetSchema::Extended),
            _ => None,
        }
    }

    /// Canonical column names in file order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            DatasetSchema::Basic => &Self::BASIC_COLUMNS,
            DatasetSchema::Extended => &Self::EXTENDED_COLUMNS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DatasetSchema::Basic => "basic",
            DatasetSchema::Extended => "extended",
        }
    }

    pub fn has_demographics(self) -> bool {
        self == DatasetSchema::Extended
    }
}

// ---------------------------------------------------------------------------
// TripRecord / Trip – one row of the city table
// ---------------------------------------------------------------------------

/// A single trip as stored in the city file.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Trip length in seconds.
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: String,
    /// Only present for [`DatasetSchema::Extended`] files.
    pub gender: Option<String>,
    /// Only present for [`DatasetSchema::Extended`] files.
    pub birth_year: Option<i32>,
}

/// A trip together with the fields derived from its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub record: TripRecord,
    pub month: Month,
    pub weekday: Weekday,
    /// Hour of day, 0–23.
    pub hour: u32,
}

impl Trip {
    pub fn new(record: TripRecord) -> Self {
        let start = record.start_time;
        // month() is always 1..=12
        let month = Month::try_from(start.month() as u8).unwrap_or(Month::January);
        Trip {
            month,
            weekday: start.weekday(),
            hour: start.hour(),
            record,
        }
    }

    /// "Start - End" key used for the popular-trip statistic.
    pub fn route(&self) -> String {
        format!("{} - {}", self.record.start_station, self.record.end_station)
    }
}

// ---------------------------------------------------------------------------
// FilteredTable – the trips one session iteration works on
// ---------------------------------------------------------------------------

/// Trips of one city after the month/day filters were applied.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    pub city: City,
    pub schema: DatasetSchema,
    pub trips: Vec<Trip>,
}

impl FilteredTable {
    /// Number of trips.
    pub fn len(&self) -> usize {
        self.trips.len()
    }

    /// Whether no trip matched the selection.
    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn catalog_joins_data_dir() {
        let catalog = CityCatalog::new("/data");
        assert_eq!(
            catalog.path_for(City::NewYorkCity),
            PathBuf::from("/data/new_york_city.csv")
        );
        let names: Vec<&str> = catalog.choices().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["chicago", "new york city", "washington"]);
    }

    #[test]
    fn schema_from_column_count() {
        assert_eq!(DatasetSchema::from_column_count(6), Some(DatasetSchema::Basic));
        assert_eq!(DatasetSchema::from_column_count(8), Some(DatasetSchema::Extended));
        assert_eq!(DatasetSchema::from_column_count(7), None);
    }

    #[test]
    fn trip_derives_month_weekday_hour() {
        // 2017-06-23 was a Friday
        let start = NaiveDate::from_ymd_opt(2017, 6, 23)
            .unwrap()
            .and_hms_opt(15, 9, 32)
            .unwrap();
        let trip = Trip::new(TripRecord {
            start_time: start,
            end_time: start,
            trip_duration: 60.0,
            start_station: "A".into(),
            end_station: "B".into(),
            user_type: "Subscriber".into(),
            gender: None,
            birth_year: None,
        });
        assert_eq!(month_label(trip.month), "June");
        assert_eq!(weekday_label(trip.weekday), "Friday");
        assert_eq!(trip.hour, 15);
        assert_eq!(trip.route(), "A - B");
    }

    #[test]
    fn name_tables_agree_with_labels() {
        for (name, month) in MONTHS {
            assert_eq!(name, month_label(month).to_ascii_lowercase());
        }
        for (name, day) in WEEKDAYS {
            assert_eq!(name, weekday_label(day).to_ascii_lowercase());
        }
    }
}
