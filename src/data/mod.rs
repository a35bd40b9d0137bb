//! Data module - loading, joining, coercion, region codes and filtering

mod coerce;
mod filter;
mod join;
mod loader;
mod model;
mod pipeline;
pub mod region;

pub use coerce::{coerce_numeric, coerce_rows};
pub use filter::{ColumnDomain, FilterConstraints, ValueRange, INCOME_STEP, PREVALENCE_STEP};
pub use join::{inner_join, join_sources, Keyed};
pub use loader::{DataLoader, LoaderError};
pub use model::{JoinedRow, Record, RegionRecord, SourceKind, SourceRow, SourceTable, STATE_COLUMN};
pub use pipeline::{DataPipeline, Dataset, SourcePaths};
pub use region::{resolve_regions, Region};
