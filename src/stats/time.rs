use std::io::{self, Write};

use chrono::{Month, Weekday};

use super::{mode, timed_section};
use crate::data::model::{month_label, weekday_label, FilteredTable};

/// Most frequent times of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeStats {
    pub month: Month,
    pub weekday: Weekday,
    pub hour: u32,
}

pub fn compute(table: &FilteredTable) -> Option<TimeStats> {
    Some(TimeStats {
        month: mode(table.trips.iter().map(|t| t.month))?,
        weekday: mode(table.trips.iter().map(|t| t.weekday))?,
        hour: mode(table.trips.iter().map(|t| t.hour))?,
    })
}

pub fn report<W: Write>(table: &FilteredTable, out: &mut W) -> io::Result<()> {
    timed_section(
        out,
        "Calculating The Most Frequent Times of Travel...",
        table,
        |out, table| {
            let Some(stats) = compute(table) else {
                return Ok(());
            };
            writeln!(out, "The most common month is: {}", month_label(stats.month))?;
            writeln!(out, "The most common day of week is: {}", weekday_label(stats.weekday))?;
            writeln!(out, "The most common hour is: {}", stats.hour)
        },
    )
}
