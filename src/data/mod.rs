/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → LaunchTable
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LaunchTable  │  Vec<LaunchRecord>, payload bounds, SiteCatalog
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site ∧ payload-range predicate → matching records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
