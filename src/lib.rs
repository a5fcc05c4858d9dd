#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Aggregation views and series construction.
pub mod aggregate;
/// Normalized-table memoization keyed by source identity.
pub mod cache;
/// Dashboard configuration types.
pub mod config;
/// Centralized constants for the export layout, calendar buckets, and views.
pub mod constants;
/// Field coercion and derived-field computation.
pub mod normalize;
/// Raw and normalized record types.
pub mod record;
/// Record source traits and built-in sources.
pub mod source;
/// Shared type aliases.
pub mod types;
/// View-selection boundary: menu choices, chart parameters, detail tables.
pub mod view;

mod errors;

pub use aggregate::{
    Aggregation, Series, SeriesKey, SeriesPoint, ViewKind, aggregate, distinct_products,
};
pub use cache::TableCache;
pub use config::DashboardConfig;
pub use errors::{PipelineError, RowError};
pub use normalize::{
    NormalizeStats, NormalizedBatch, TimestampShape, detect_shape, derive_city, normalize,
    normalize_row, normalize_with_stats, parse_order_timestamp,
};
pub use record::{RawRecord, SalesRecord};
pub use source::{CsvFileSource, InMemorySource, LoadStats, RecordSource, SourceBatch};
pub use types::{CityLabel, OrderId, ProductName, RawTimestamp, SourceKey};
pub use view::{
    AxisKind, ChartSpec, DetailRow, DetailTable, MenuChoice, Palette, Tooltip, ViewPlan,
    detail_table, detail_table_for, plan_for,
};
