/// Data layer: core types, loading, filtering and yearly aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, year / gender index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  gender + year range → Vec<&Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  series   │  one value per year → YearlySeries
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod series;
