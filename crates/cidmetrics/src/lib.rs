//! cidmetrics: Read and re-encode CID font glyph metrics in PDF documents.
//!
//! This is the public API facade crate. It re-exports types from
//! cidmetrics-core and uses cidmetrics-parse for the `/W`, `/W2`, `/DW`,
//! and `/DW2` codecs.
//!
//! # Architecture
//!
//! - **cidmetrics-core**: Backend-independent data model and run partitioning
//! - **cidmetrics-parse**: lopdf-backed codecs and CIDFont dictionary access
//! - **cidmetrics** (this crate): Document-level API that ties everything together

mod pdf;

pub use cidmetrics_core;
pub use cidmetrics_core::{
    Cid, DEFAULT_VMETRICS, DEFAULT_WIDTH, DefaultVMetrics, ExtractResult, MetricsError,
    MetricsKey, MetricsWarning, MetricsWarningCode, Run, ScanOptions, VMetrics, VMetricsMap,
    WidthMap, sorted_entries,
};
pub use cidmetrics_parse;
pub use cidmetrics_parse::{
    CidFontMetrics, CidFontType, CidSystemInfo, CidToGidMap, decode_default_vmetrics,
    decode_default_width, decode_vmetrics, decode_widths, encode_default_vmetrics,
    encode_default_width, encode_vmetrics, encode_widths,
};
pub use pdf::{CidFontEntry, MetricsPdf, RecodeSummary};
