/// Data layer: core types, loading, caching, and queries.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐      ┌──────────────┐
///   │  loader   │ ◄─── │ DatasetCache  │  memoized, reload on mtime change
///   └──────────┘      └──────────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ RecordTable   │  Vec<Record>, distinct values, indicator columns
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  query    │  exact match / cross-section / longitudinal → RowSet, KPI
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  order    │  survey ordering for the trend chart
///   │  series   │  RowSet → chart points
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod loader;
pub mod model;
pub mod order;
pub mod query;
pub mod series;

pub use cache::{CachePolicy, DatasetCache};
pub use error::{LoadError, NoDataAvailable, NoDataReason};
pub use loader::{load_file, load_with_columns};
pub use model::{CellValue, KeyColumns, Record, RecordTable};
pub use order::SurveyOrder;
pub use query::{cross_section, filter_exact, kpi, longitudinal, FilterSelection, Kpi, RowSet};
