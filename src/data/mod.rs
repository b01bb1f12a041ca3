/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  claims .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows, normalise ClaimDate → ClaimDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ ClaimDataset  │  Vec<ClaimRecord>, facet options
///   └──────────────┘
///        │  + FilterSpec
///        ▼
///   ┌──────────┐
///   │  filter   │  AND of all predicates → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  KPIs + chart series → Dashboard
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
