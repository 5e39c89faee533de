//! cidmetrics-core: Backend-independent CID font metrics types and algorithms.
//!
//! This crate provides the data model for composite font glyph metrics
//! ([`WidthMap`], [`VMetrics`], [`DefaultVMetrics`]), the run partitioning
//! algorithm shared by the `/W` and `/W2` encoders, and the error, warning,
//! and option types used across cidmetrics. It has no PDF object model
//! dependency.

pub mod error;
pub mod metrics;
pub mod runs;

pub use error::{
    ExtractResult, MetricsError, MetricsKey, MetricsWarning, MetricsWarningCode, ScanOptions,
};
pub use metrics::{
    Cid, DEFAULT_VMETRICS, DEFAULT_WIDTH, DefaultVMetrics, MAX_CID, MAX_RANGE_SPAN, VMetrics,
    VMetricsMap, WidthMap, sorted_entries,
};
pub use runs::{Run, RunBuilder, partition_runs};
