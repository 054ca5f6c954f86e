use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::StringRecord;
use serde::Deserialize;

use super::filter::{self, FilterSelection};
use super::model::{CityCatalog, DatasetSchema, FilteredTable, Trip, TripRecord};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the selected city's file and apply the month/day filters.
pub fn load_city(catalog: &CityCatalog, selection: &FilterSelection) -> Result<FilteredTable> {
    let path = catalog.path_for(selection.city);
    let (schema, trips) = load_file(&path)
        .with_context(|| format!("loading {} data from {}", selection.city, path.display()))?;
    let total = trips.len();
    let trips = filter::apply(trips, selection);

    log::info!(
        "Loaded {total} {} trips ({schema:?} schema), {} after filters",
        selection.city,
        trips.len()
    );

    Ok(FilteredTable {
        city: selection.city,
        schema,
        trips,
    })
}

/// Read a city CSV into trips, choosing the schema from its column count.
///
/// Layout: header row, an optional leading index column (empty header or
/// `Unnamed: 0`), then 6 or 8 positional columns:
///   start time, end time, duration, start station, end station, user type
///   [, gender, birth year]
pub fn load_file(path: &Path) -> Result<(DatasetSchema, Vec<Trip>)> {
    if !path.is_file() {
        return Err(LoadError::MissingFile {
            path: path.to_path_buf(),
        }
        .into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let offset = usize::from(has_index_column(&headers));
    let columns = headers.len().saturating_sub(offset);
    let schema =
        DatasetSchema::from_column_count(columns).ok_or_else(|| LoadError::UnsupportedLayout {
            path: path.to_path_buf(),
            columns,
        })?;
    log::debug!(
        "{}: index column {}, reading as [{}]",
        path.display(),
        if offset == 1 { "dropped" } else { "absent" },
        schema.columns().join(", ")
    );

    let mut trips = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| LoadError::BadRow {
            row,
            reason: e.to_string(),
        })?;
        let fields: StringRecord = record.iter().skip(offset).collect();
        let trip = parse_row(&fields, schema).map_err(|reason| LoadError::BadRow { row, reason })?;
        trips.push(trip);
    }

    Ok((schema, trips))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct BasicRow {
    start_time: String,
    end_time: String,
    trip_duration: f64,
    start_station: String,
    end_station: String,
    user_type: String,
}

#[derive(Debug, Deserialize)]
struct ExtendedRow {
    start_time: String,
    end_time: String,
    trip_duration: f64,
    start_station: String,
    end_station: String,
    user_type: String,
    gender: Option<String>,
    birth_year: Option<f64>,
}

impl From<BasicRow> for ExtendedRow {
    fn from(row: BasicRow) -> Self {
        ExtendedRow {
            start_time: row.start_time,
            end_time: row.end_time,
            trip_duration: row.trip_duration,
            start_station: row.start_station,
            end_station: row.end_station,
            user_type: row.user_type,
            gender: None,
            birth_year: None,
        }
    }
}

fn has_index_column(headers: &StringRecord) -> bool {
    headers
        .get(0)
        .is_some_and(|h| h.is_empty() || h.starts_with("Unnamed"))
}

fn parse_row(fields: &StringRecord, schema: DatasetSchema) -> Result<Trip, String> {
    let row: ExtendedRow = match schema {
        DatasetSchema::Basic => fields
            .deserialize::<BasicRow>(None)
            .map_err(|e| e.to_string())?
            .into(),
        DatasetSchema::Extended => fields
            .deserialize::<ExtendedRow>(None)
            .map_err(|e| e.to_string())?,
    };

    let start_time = parse_timestamp(&row.start_time)
        .ok_or_else(|| format!("invalid start time '{}'", row.start_time))?;
    let end_time = parse_timestamp(&row.end_time)
        .ok_or_else(|| format!("invalid end time '{}'", row.end_time))?;
    if !row.trip_duration.is_finite() {
        return Err(format!("invalid trip duration '{}'", row.trip_duration));
    }
    let birth_year = match row.birth_year {
        Some(y) if !y.is_finite() => return Err(format!("invalid birth year '{y}'")),
        Some(y) => Some(y.round() as i32),
        None => None,
    };

    Ok(Trip::new(TripRecord {
        start_time,
        end_time,
        trip_duration: row.trip_duration,
        start_station: row.start_station,
        end_station: row.end_station,
        user_type: row.user_type,
        gender: row.gender,
        birth_year,
    }))
}

/// Accepts `2017-06-23 15:09:32`, an optional fractional part, and the
/// `T`-separated ISO form.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::Period;
    use crate::data::model::City;
    use chrono::{Month, Weekday};
    use std::io::Write;

    const EXTENDED: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
304487,2017-06-05 12:01:00,2017-06-05 12:21:00,1200,Theater on the Lake,Clark St & Elm St,Subscriber,Male,1981.0
";

    const BASIC: &str = "\
Unnamed: 0,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn write_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
            f.write_all(body.as_bytes()).unwrap();
        }
        dir
    }

    #[test]
    fn extended_file_keeps_demographics() {
        let dir = write_dir(&[("chicago.csv", EXTENDED)]);
        let (schema, trips) = load_file(&dir.path().join("chicago.csv")).unwrap();
        assert_eq!(schema, DatasetSchema::Extended);
        assert_eq!(trips.len(), 4);

        let first = &trips[0].record;
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));

        // empty demographic cells
        assert_eq!(trips[2].record.gender, None);
        assert_eq!(trips[2].record.birth_year, None);
    }

    #[test]
    fn basic_file_has_no_demographics() {
        let dir = write_dir(&[("washington.csv", BASIC)]);
        let (schema, trips) = load_file(&dir.path().join("washington.csv")).unwrap();
        assert_eq!(schema, DatasetSchema::Basic);
        assert_eq!(trips.len(), 2);
        assert!((trips[0].record.trip_duration - 489.066).abs() < 1e-9);
        assert!(trips.iter().all(|t| t.record.gender.is_none()));
    }

    #[test]
    fn file_without_index_column_loads() {
        let body = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-02-01T07:00:00,2017-02-01T07:10:00,600,A,B,Customer
";
        let dir = write_dir(&[("washington.csv", body)]);
        let (schema, trips) = load_file(&dir.path().join("washington.csv")).unwrap();
        assert_eq!(schema, DatasetSchema::Basic);
        assert_eq!(trips[0].month, Month::February);
        assert_eq!(trips[0].hour, 7);
    }

    #[test]
    fn missing_file_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("chicago.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingFile { .. })
        ));
    }

    #[test]
    fn unexpected_column_count_is_rejected() {
        let body = ",a,b,c\n1,2,3,4\n";
        let dir = write_dir(&[("chicago.csv", body)]);
        let err = load_file(&dir.path().join("chicago.csv")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::UnsupportedLayout { columns: 3, .. })
        ));
    }

    #[test]
    fn bad_timestamp_reports_row() {
        let body = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-01-01 00:00:00,2017-01-01 00:05:00,300,A,B,Customer
1,yesterday,2017-01-01 00:05:00,300,A,B,Customer
";
        let dir = write_dir(&[("washington.csv", body)]);
        let err = load_file(&dir.path().join("washington.csv")).unwrap_err();
        match err.downcast_ref::<LoadError>() {
            Some(LoadError::BadRow { row, reason }) => {
                assert_eq!(*row, 2);
                assert!(reason.contains("yesterday"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_city_applies_selection() {
        let dir = write_dir(&[("chicago.csv", EXTENDED)]);
        let catalog = CityCatalog::new(dir.path());

        let all = load_city(&catalog, &FilterSelection::unfiltered(City::Chicago)).unwrap();
        assert_eq!(all.len(), 4);

        let june = FilterSelection {
            month: Period::Only(Month::June),
            ..FilterSelection::unfiltered(City::Chicago)
        };
        let table = load_city(&catalog, &june).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.trips.iter().all(|t| t.month == Month::June));

        // 2017-06-23 is a Friday, 2017-06-05 a Monday
        let june_mondays = FilterSelection {
            day: Period::Only(Weekday::Mon),
            ..june
        };
        let table = load_city(&catalog, &june_mondays).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.trips[0].record.end_station, "Clark St & Elm St");

        let december = FilterSelection {
            month: Period::Only(Month::December),
            ..FilterSelection::unfiltered(City::Chicago)
        };
        assert!(load_city(&catalog, &december).unwrap().is_empty());
    }
}
