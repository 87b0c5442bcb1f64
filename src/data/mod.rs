/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  atl_weather_*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → Record, truncate dates to DayKey
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  DataSet  │  Vec<Record> sorted by date, DayKey index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  brush rectangle → records inside it
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
