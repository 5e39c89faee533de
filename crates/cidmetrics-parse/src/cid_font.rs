//! CIDFont dictionary access.
//!
//! Handles Type0 (composite) fonts with CIDFontType0 and CIDFontType2
//! descendant fonts. Reads and writes the glyph metrics keys (`/W`, `/DW`,
//! `/W2`, `/DW2`) through the codecs in [`crate::widths`] and
//! [`crate::vmetrics`], along with the CID-to-GID mapping and
//! `/CIDSystemInfo` a consumer of the metrics needs.

use cidmetrics_core::{Cid, DefaultVMetrics, VMetrics, VMetricsMap, WidthMap};
use lopdf::{Dictionary, Document, Object};

use crate::error::BackendError;
use crate::object::{get_name, resolve};
use crate::vmetrics::{
    decode_default_vmetrics, decode_vmetrics, encode_default_vmetrics, encode_vmetrics,
};
use crate::widths::{decode_default_width, decode_widths, encode_default_width, encode_widths};

/// CID font subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CidFontType {
    /// CIDFontType0: CID-keyed font based on CFF outlines.
    Type0,
    /// CIDFontType2: CID-keyed font based on TrueType outlines.
    Type2,
}

impl CidFontType {
    /// The `/Subtype` name of this font type.
    pub fn as_str(&self) -> &'static str {
        match self {
            CidFontType::Type0 => "CIDFontType0",
            CidFontType::Type2 => "CIDFontType2",
        }
    }

    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"CIDFontType0" => Some(CidFontType::Type0),
            b"CIDFontType2" => Some(CidFontType::Type2),
            _ => None,
        }
    }
}

/// CID-to-GID (glyph ID) mapping strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum CidToGidMap {
    /// Identity mapping: CID equals GID directly.
    Identity,
    /// Explicit mapping: byte array where GID for CID `n` is at bytes `2n` and `2n+1`
    /// (big-endian u16).
    Explicit(Vec<u16>),
}

impl CidToGidMap {
    /// Map a CID to a GID.
    pub fn map(&self, cid: Cid) -> u16 {
        match self {
            CidToGidMap::Identity => cid,
            CidToGidMap::Explicit(table) => table.get(usize::from(cid)).copied().unwrap_or(cid),
        }
    }

    /// Parse a CIDToGIDMap from raw stream bytes (big-endian u16 pairs).
    pub fn from_stream(data: &[u8]) -> Self {
        let table = data
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        CidToGidMap::Explicit(table)
    }
}

/// CID system information from the /CIDSystemInfo dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct CidSystemInfo {
    /// Registry (e.g., "Adobe").
    pub registry: String,
    /// Ordering (e.g., "Japan1", "GB1", "CNS1", "Korea1", "Identity").
    pub ordering: String,
    /// Supplement number.
    pub supplement: i64,
}

impl CidSystemInfo {
    /// The conventional `Registry-Ordering-Supplement` name.
    pub fn collection_name(&self) -> String {
        format!("{}-{}-{}", self.registry, self.ordering, self.supplement)
    }
}

/// Glyph metrics and CID mapping of one CIDFont dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct CidFontMetrics {
    /// `/BaseFont`, if present.
    pub base_font: Option<String>,
    /// CID font subtype.
    pub font_type: CidFontType,
    /// Width for CIDs not in `widths` (from /DW).
    pub default_width: f64,
    /// Explicit per-CID widths (from /W).
    pub widths: WidthMap,
    /// Vertical metrics for CIDs not in `vmetrics` (from /DW2).
    pub default_vmetrics: DefaultVMetrics,
    /// Explicit per-CID vertical metrics (from /W2).
    pub vmetrics: VMetricsMap,
    /// CID-to-GID mapping.
    pub cid_to_gid: CidToGidMap,
    /// CID system information.
    pub system_info: Option<CidSystemInfo>,
}

impl CidFontMetrics {
    /// Metrics with every key at its default.
    pub fn new(font_type: CidFontType) -> Self {
        Self {
            base_font: None,
            font_type,
            default_width: cidmetrics_core::DEFAULT_WIDTH,
            widths: WidthMap::new(),
            default_vmetrics: DefaultVMetrics::default(),
            vmetrics: VMetricsMap::new(),
            cid_to_gid: CidToGidMap::Identity,
            system_info: None,
        }
    }

    /// Get the width for a CID in glyph space (1/1000 of text space).
    pub fn width(&self, cid: Cid) -> f64 {
        self.widths.get(&cid).copied().unwrap_or(self.default_width)
    }

    /// Get the vertical metrics for a CID.
    ///
    /// Without an explicit `/W2` entry, the position vector's horizontal
    /// component is half the glyph's horizontal width.
    pub fn vertical_metrics(&self, cid: Cid) -> VMetrics {
        match self.vmetrics.get(&cid) {
            Some(vm) => *vm,
            None => self.default_vmetrics.for_width(self.width(cid)),
        }
    }

    /// Map a CID to a GID.
    pub fn map_cid_to_gid(&self, cid: Cid) -> u16 {
        self.cid_to_gid.map(cid)
    }
}

/// The value of `key`, treating `null` (direct or referenced) as absent.
fn present<'a>(doc: &'a Document, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let obj = dict.get(key).ok()?;
    match resolve(doc, obj) {
        Object::Null => None,
        _ => Some(obj),
    }
}

/// Extract metrics from a CIDFont dictionary (descendant of Type0).
///
/// A malformed `/W` or `/W2` fails the whole font: partial metrics would
/// silently mis-position text. `/DW` and `/DW2` fall back to their defaults.
pub fn extract_cid_font_metrics(
    doc: &Document,
    cid_font_dict: &Dictionary,
) -> Result<CidFontMetrics, BackendError> {
    let font_type = cid_font_dict
        .get(b"Subtype")
        .ok()
        .and_then(|o| get_name(doc, o))
        .and_then(CidFontType::from_name)
        .ok_or_else(|| BackendError::Font("missing or unknown CIDFont /Subtype".to_string()))?;

    let base_font = cid_font_dict
        .get(b"BaseFont")
        .ok()
        .and_then(|o| get_name(doc, o))
        .map(|name| String::from_utf8_lossy(name).into_owned());

    let default_width = decode_default_width(doc, present(doc, cid_font_dict, b"DW"));
    let widths = match present(doc, cid_font_dict, b"W") {
        Some(obj) => decode_widths(doc, obj)?,
        None => WidthMap::new(),
    };

    let default_vmetrics = decode_default_vmetrics(doc, present(doc, cid_font_dict, b"DW2"));
    let vmetrics = match present(doc, cid_font_dict, b"W2") {
        Some(obj) => decode_vmetrics(doc, obj)?,
        None => VMetricsMap::new(),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        base_font = base_font.as_deref().unwrap_or("<unnamed>"),
        widths = widths.len(),
        vmetrics = vmetrics.len(),
        "decoded CIDFont metrics"
    );

    Ok(CidFontMetrics {
        base_font,
        font_type,
        default_width,
        widths,
        default_vmetrics,
        vmetrics,
        cid_to_gid: parse_cid_to_gid_map(doc, cid_font_dict),
        system_info: parse_cid_system_info(doc, cid_font_dict),
    })
}

/// Write the metrics keys of `metrics` into a CIDFont dictionary.
///
/// Keys whose value is the default (or whose array would be empty) are
/// removed, so the dictionary ends up in canonical form.
pub fn write_cid_font_metrics(metrics: &CidFontMetrics, dict: &mut Dictionary) {
    set_or_remove(dict, "DW", encode_default_width(metrics.default_width));

    let w = encode_widths(&metrics.widths, metrics.default_width);
    set_or_remove(dict, "W", (!w.is_empty()).then_some(Object::Array(w)));

    set_or_remove(dict, "DW2", encode_default_vmetrics(&metrics.default_vmetrics));

    let w2 = encode_vmetrics(&metrics.vmetrics);
    set_or_remove(dict, "W2", (!w2.is_empty()).then_some(Object::Array(w2)));
}

fn set_or_remove(dict: &mut Dictionary, key: &str, value: Option<Object>) {
    match value {
        Some(value) => dict.set(key, value),
        None => {
            dict.remove(key.as_bytes());
        }
    }
}

/// Parse the /CIDToGIDMap entry from a CIDFont dictionary.
fn parse_cid_to_gid_map(doc: &Document, dict: &Dictionary) -> CidToGidMap {
    let Ok(obj) = dict.get(b"CIDToGIDMap") else {
        return CidToGidMap::Identity;
    };
    match resolve(doc, obj) {
        Object::Stream(stream) => {
            let data = if stream.dict.get(b"Filter").is_ok() {
                stream.decompressed_content().unwrap_or_default()
            } else {
                stream.content.clone()
            };
            CidToGidMap::from_stream(&data)
        }
        _ => CidToGidMap::Identity,
    }
}

/// Parse /CIDSystemInfo from a CIDFont dictionary.
fn parse_cid_system_info(doc: &Document, dict: &Dictionary) -> Option<CidSystemInfo> {
    let info_obj = dict.get(b"CIDSystemInfo").ok()?;
    let Object::Dictionary(info_dict) = resolve(doc, info_obj) else {
        return None;
    };

    let text = |key: &[u8]| {
        info_dict
            .get(key)
            .ok()
            .and_then(|o| match resolve(doc, o) {
                Object::String(s, _) => Some(String::from_utf8_lossy(s).into_owned()),
                _ => None,
            })
            .unwrap_or_default()
    };

    let supplement = info_dict
        .get(b"Supplement")
        .ok()
        .and_then(|o| match resolve(doc, o) {
            Object::Integer(i) => Some(*i),
            _ => None,
        })
        .unwrap_or(0);

    Some(CidSystemInfo {
        registry: text(b"Registry"),
        ordering: text(b"Ordering"),
        supplement,
    })
}

/// Detect whether a font dictionary represents a Type0 (composite) font.
pub fn is_type0_font(font_dict: &Dictionary) -> bool {
    matches!(font_dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Type0")
}

/// Detect whether a dictionary is a CIDFont (CIDFontType0 or CIDFontType2).
pub fn is_cid_font(font_dict: &Dictionary) -> bool {
    let is_font = matches!(font_dict.get(b"Type"), Ok(Object::Name(name)) if name == b"Font");
    is_font
        && matches!(
            font_dict.get(b"Subtype"),
            Ok(Object::Name(name)) if CidFontType::from_name(name).is_some()
        )
}

/// Extract the descendant CIDFont dictionary from a Type0 font.
pub fn get_descendant_font<'a>(
    doc: &'a Document,
    type0_dict: &'a Dictionary,
) -> Option<&'a Dictionary> {
    let descendants = type0_dict.get(b"DescendantFonts").ok()?;
    let Object::Array(arr) = resolve(doc, descendants) else {
        return None;
    };
    match resolve(doc, arr.first()?) {
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}
