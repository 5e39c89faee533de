//! cidmetrics-parse: PDF codecs for composite font glyph metrics.
//!
//! Converts between the [`cidmetrics_core`] data model and the lopdf object
//! model: the `/W` and `/DW` width encodings ([`widths`]), the `/W2` and
//! `/DW2` vertical metrics encodings ([`vmetrics`]), and the CIDFont
//! dictionary layer that reads and writes them ([`cid_font`]).

pub mod cid_font;
mod codec;
pub mod error;
pub mod object;
pub mod vmetrics;
pub mod widths;

pub use cid_font::{
    CidFontMetrics, CidFontType, CidSystemInfo, CidToGidMap, extract_cid_font_metrics,
    get_descendant_font, is_cid_font, is_type0_font, write_cid_font_metrics,
};
pub use cidmetrics_core;
pub use error::BackendError;
pub use vmetrics::{
    decode_default_vmetrics, decode_vmetrics, encode_default_vmetrics, encode_vmetrics,
};
pub use widths::{decode_default_width, decode_widths, encode_default_width, encode_widths};
