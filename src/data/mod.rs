/// Data layer: catalog types, fetching, snapshot I/O, cleaning and
/// classification.
///
/// Architecture:
/// ```text
///   TAP archive / snapshot
///        │
///        ▼
///   ┌──────────┐
///   │  fetch    │  one query → Catalog
///   └──────────┘
///        │            loader: write_csv (raw snapshot)
///        ▼
///   ┌──────────┐
///   │  filter   │  drop rows missing period / radius / mass / teff
///   └──────────┘
///        │            loader: write_csv (cleaned snapshot)
///        ▼
///   ┌──────────┐
///   │ classify  │  distance_au + habitable flag per record
///   └──────────┘
/// ```

pub mod classify;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod model;
