//! Descriptive statistics over a [`FilteredTable`].
//!
//! Each reporter is independent and read-only; [`report_all`] runs them in
//! the fixed session order.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{self, Write};
use std::time::Instant;

use crate::data::model::FilteredTable;

pub mod duration;
pub mod station;
pub mod time;
pub mod users;

pub const NO_DATA: &str = "No data for this selection.";

// ---------------------------------------------------------------------------
// Column helpers
// ---------------------------------------------------------------------------

/// Count distinct values, most frequent first.
///
/// Equal counts keep the order in which values were first seen.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match slots.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slots.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent value; ties go to the value seen first. `None` when empty.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(value, _)| value)
}

// ---------------------------------------------------------------------------
// Section framing
// ---------------------------------------------------------------------------

/// Print a titled, timed report section.
///
/// `body` only runs on a non-empty table; otherwise [`NO_DATA`] is printed.
pub fn timed_section<W, F>(out: &mut W, title: &str, table: &FilteredTable, body: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W, &FilteredTable) -> io::Result<()>,
{
    writeln!(out, "\n{title}\n")?;
    let started = Instant::now();

    if table.is_empty() {
        writeln!(out, "{NO_DATA}")?;
    } else {
        body(out, table)?;
    }

    let elapsed = started.elapsed();
    log::debug!("{title} took {elapsed:?}");
    writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(40))
}

/// Run every reporter in session order.
pub fn report_all<W: Write>(table: &FilteredTable, out: &mut W) -> io::Result<()> {
    time::report(table, out)?;
    station::report(table, out)?;
    duration::report(table, out)?;
    users::report(table, out)
}
