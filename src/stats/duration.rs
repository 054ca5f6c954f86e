use std::io::{self, Write};

use super::timed_section;
use crate::data::model::FilteredTable;

/// Total and mean trip duration, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationStats {
    pub total: f64,
    pub mean: f64,
}

pub fn compute(table: &FilteredTable) -> Option<DurationStats> {
    if table.is_empty() {
        return None;
    }
    let total: f64 = table.trips.iter().map(|t| t.record.trip_duration).sum();
    Some(DurationStats {
        total,
        mean: total / table.len() as f64,
    })
}

/// Whole-second breakdown such as `1d 2h 3m 4s`; leading zero units are omitted.
pub fn humanize(seconds: f64) -> String {
    let secs = seconds.round().max(0.0) as u64;
    let (days, rest) = (secs / 86_400, secs % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, secs) = (rest / 60, rest % 60);

    match (days, hours, minutes) {
        (0, 0, 0) => format!("{secs}s"),
        (0, 0, _) => format!("{minutes}m {secs}s"),
        (0, _, _) => format!("{hours}h {minutes}m {secs}s"),
        _ => format!("{days}d {hours}h {minutes}m {secs}s"),
    }
}

pub fn report<W: Write>(table: &FilteredTable, out: &mut W) -> io::Result<()> {
    timed_section(out, "Calculating Trip Duration...", table, |out, table| {
        let Some(stats) = compute(table) else {
            return Ok(());
        };
        writeln!(
            out,
            "The total travel time is: {} seconds ({})",
            stats.total,
            humanize(stats.total)
        )?;
        writeln!(
            out,
            "The mean travel time is: {} seconds ({})",
            stats.mean,
            humanize(stats.mean)
        )
    })
}
