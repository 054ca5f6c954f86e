use std::io::{self, Write};

use super::{mode, timed_section};
use crate::data::model::FilteredTable;

/// Most popular stations and start/end combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// "Start - End"
    pub route: String,
}

pub fn compute(table: &FilteredTable) -> Option<StationStats> {
    let trips = &table.trips;
    Some(StationStats {
        start_station: mode(trips.iter().map(|t| t.record.start_station.as_str()))?.to_owned(),
        end_station: mode(trips.iter().map(|t| t.record.end_station.as_str()))?.to_owned(),
        route: mode(trips.iter().map(|t| t.route()))?,
    })
}

pub fn report<W: Write>(table: &FilteredTable, out: &mut W) -> io::Result<()> {
    timed_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        table,
        |out, table| {
            let Some(stats) = compute(table) else {
                return Ok(());
            };
            writeln!(out, "The most commonly used start station is: {}", stats.start_station)?;
            writeln!(out, "The most commonly used end station is: {}", stats.end_station)?;
            writeln!(out, "The most frequent start-end stations combination: {}", stats.route)
        },
    )
}
