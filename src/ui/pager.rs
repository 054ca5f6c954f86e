use std::io::{BufRead, Write};
use std::ops::Range;
use std::sync::Arc;

use anyhow::Result;
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray, UInt32Array, UInt64Array};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use super::prompt::Prompter;
use crate::data::model::{month_label, weekday_label, FilteredTable, Trip};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn text_column<'a>(trips: &'a [Trip], f: impl Fn(&'a Trip) -> String) -> ArrayRef {
    Arc::new(StringArray::from(trips.iter().map(f).collect::<Vec<_>>()))
}

/// Render `rows` of the table as a boxed text table.
pub fn render_rows(table: &FilteredTable, rows: Range<usize>) -> Result<String, ArrowError> {
    let first = rows.start;
    let trips = &table.trips[rows];

    let mut columns: Vec<(&str, ArrayRef)> = vec![
        (
            "row",
            Arc::new(UInt64Array::from_iter_values(
                (first..first + trips.len()).map(|i| i as u64),
            )) as ArrayRef,
        ),
        (
            "start_time",
            text_column(trips, |t| t.record.start_time.format(TIMESTAMP_FORMAT).to_string()),
        ),
        (
            "end_time",
            text_column(trips, |t| t.record.end_time.format(TIMESTAMP_FORMAT).to_string()),
        ),
        (
            "trip_duration",
            Arc::new(Float64Array::from_iter_values(
                trips.iter().map(|t| t.record.trip_duration),
            )) as ArrayRef,
        ),
        ("start_station", text_column(trips, |t| t.record.start_station.clone())),
        ("end_station", text_column(trips, |t| t.record.end_station.clone())),
        ("user_type", text_column(trips, |t| t.record.user_type.clone())),
    ];

    if table.schema.has_demographics() {
        columns.push((
            "gender",
            Arc::new(StringArray::from(
                trips
                    .iter()
                    .map(|t| t.record.gender.as_deref())
                    .collect::<Vec<_>>(),
            )) as ArrayRef,
        ));
        columns.push((
            "birth_year",
            Arc::new(Int32Array::from(
                trips.iter().map(|t| t.record.birth_year).collect::<Vec<_>>(),
            )) as ArrayRef,
        ));
    }

    columns.push(("month", text_column(trips, |t| month_label(t.month).to_owned())));
    columns.push(("dow", text_column(trips, |t| weekday_label(t.weekday).to_owned())));
    columns.push((
        "hour",
        Arc::new(UInt32Array::from_iter_values(trips.iter().map(|t| t.hour))) as ArrayRef,
    ));

    let batch = RecordBatch::try_from_iter(columns)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}

// ---------------------------------------------------------------------------
// Interactive paging
// ---------------------------------------------------------------------------

/// Offer the raw rows five at a time until the user declines or the table
/// runs out. An empty table shows nothing and asks nothing.
pub fn page_raw_data<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &FilteredTable,
) -> Result<()> {
    if table.is_empty() {
        return Ok(());
    }
    if !prompter.ask_yes_no("\nWould you like to see first 5 rows of raw data?\n")? {
        return Ok(());
    }

    let mut cursor = 0;
    loop {
        let end = (cursor + PAGE_SIZE).min(table.len());
        let page = render_rows(table, cursor..end)?;
        writeln!(prompter.out(), "{page}")?;
        cursor = end;

        if cursor >= table.len() {
            writeln!(prompter.out(), "\nNo more rows to display.")?;
            log::debug!("Pager exhausted after {cursor} rows");
            return Ok(());
        }
        if !prompter.ask_yes_no("\nWould you like to see the next 5 rows?\n")? {
            return Ok(());
        }
    }
}
