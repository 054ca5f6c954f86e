use std::io::{self, Write};

use super::{mode, timed_section, value_counts};
use crate::data::model::FilteredTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYears {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

/// Gender and birth-year breakdown; only extended datasets carry these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demographics {
    /// Empty when every gender cell of the selection is blank.
    pub genders: Vec<(String, usize)>,
    /// `None` when every birth-year cell of the selection is blank.
    pub birth_years: Option<BirthYears>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStats {
    /// Blank cells are not counted.
    pub user_types: Vec<(String, usize)>,
    pub demographics: Option<Demographics>,
}

pub fn compute(table: &FilteredTable) -> Option<UserStats> {
    if table.is_empty() {
        return None;
    }
    let trips = &table.trips;

    let user_types = value_counts(
        trips
            .iter()
            .map(|t| t.record.user_type.as_str())
            .filter(|user_type| !user_type.is_empty()),
    )
    .into_iter()
    .map(|(value, n)| (value.to_owned(), n))
    .collect();

    let demographics = table.schema.has_demographics().then(|| {
        let genders = value_counts(trips.iter().filter_map(|t| t.record.gender.as_deref()))
            .into_iter()
            .map(|(value, n)| (value.to_owned(), n))
            .collect();

        let years: Vec<i32> = trips.iter().filter_map(|t| t.record.birth_year).collect();
        let birth_years = match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
            (Some(&earliest), Some(&most_recent), Some(most_common)) => Some(BirthYears {
                earliest,
                most_recent,
                most_common,
            }),
            _ => None,
        };

        Demographics {
            genders,
            birth_years,
        }
    });

    Some(UserStats {
        user_types,
        demographics,
    })
}

fn write_counts<W: Write>(out: &mut W, heading: &str, counts: &[(String, usize)]) -> io::Result<()> {
    writeln!(out, "{heading}")?;
    for (value, n) in counts {
        writeln!(out, " {value}: {n}")?;
    }
    writeln!(out)
}

pub fn report<W: Write>(table: &FilteredTable, out: &mut W) -> io::Result<()> {
    timed_section(out, "Calculating User Stats...", table, |out, table| {
        let Some(stats) = compute(table) else {
            return Ok(());
        };
        if stats.user_types.is_empty() {
            writeln!(out, "User type data is not available for this selection.\n")?;
        } else {
            write_counts(out, "Counts of user types:", &stats.user_types)?;
        }

        let Some(demo) = stats.demographics else {
            return Ok(());
        };
        if demo.genders.is_empty() {
            writeln!(out, "Gender data is not available for this selection.\n")?;
        } else {
            write_counts(out, "Counts of gender:", &demo.genders)?;
        }

        match demo.birth_years {
            Some(years) => {
                writeln!(out, "Earliest birth year: {}", years.earliest)?;
                writeln!(out, "Most recent birth year: {}", years.most_recent)?;
                writeln!(out, "Most common birth year: {}", years.most_common)
            }
            None => writeln!(out, "Birth year data is not available for this selection."),
        }
    })
}
