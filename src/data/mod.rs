/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  chicago.csv / new_york_city.csv / washington.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → Vec<Trip>, pick DatasetSchema
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection (month, day) → kept trips
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ FilteredTable  │  read by stats reporters and the pager
///   └───────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
