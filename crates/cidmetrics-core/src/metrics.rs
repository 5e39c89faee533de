//! Glyph metrics data model for CID-keyed fonts.
//!
//! Widths and vertical metrics are stored sparsely: a CID missing from the
//! map takes the font's default. Storage is unordered; encoders sort the
//! entries they need with [`sorted_entries`].

use std::collections::HashMap;

/// A character identifier selecting a glyph in a CIDFont.
pub type Cid = u16;

/// Largest representable CID.
pub const MAX_CID: u32 = Cid::MAX as u32;

/// Largest `last - first` accepted for a range entry when decoding.
///
/// Malformed input must never make the decoder allocate an entry per CID
/// beyond the CID domain.
pub const MAX_RANGE_SPAN: i64 = 65536;

/// Default glyph width (`/DW`) when the font dictionary does not specify one.
pub const DEFAULT_WIDTH: f64 = 1000.0;

/// Default vertical metrics (`/DW2`) when the font dictionary does not specify them.
pub const DEFAULT_VMETRICS: DefaultVMetrics = DefaultVMetrics {
    offs_y: 880.0,
    delta_y: -1000.0,
};

/// Explicit per-CID widths in glyph space units (1/1000 of text space).
pub type WidthMap = HashMap<Cid, f64>;

/// Explicit per-CID vertical metrics.
pub type VMetricsMap = HashMap<Cid, VMetrics>;

/// Vertical writing metrics for one glyph.
///
/// `(offs_x, offs_y)` is the position vector from the horizontal origin to
/// the vertical origin; `delta_y` is the vertical displacement (normally
/// negative).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VMetrics {
    /// Vertical displacement.
    pub delta_y: f64,
    /// Horizontal component of the position vector.
    pub offs_x: f64,
    /// Vertical component of the position vector.
    pub offs_y: f64,
}

impl VMetrics {
    /// Create vertical metrics from the three wire components.
    pub fn new(delta_y: f64, offs_x: f64, offs_y: f64) -> Self {
        Self {
            delta_y,
            offs_x,
            offs_y,
        }
    }
}

/// Default vertical metrics for CIDs without an explicit `/W2` entry.
///
/// The horizontal position component has no independent default: it is
/// half the glyph's horizontal width, see [`DefaultVMetrics::for_width`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DefaultVMetrics {
    /// Vertical component of the position vector.
    pub offs_y: f64,
    /// Vertical displacement.
    pub delta_y: f64,
}

impl Default for DefaultVMetrics {
    fn default() -> Self {
        DEFAULT_VMETRICS
    }
}

impl DefaultVMetrics {
    /// Whether these are the defaults implied by an absent `/DW2`.
    pub fn is_default(&self) -> bool {
        *self == DEFAULT_VMETRICS
    }

    /// The implicit metrics of a glyph with horizontal width `width`.
    pub fn for_width(&self, width: f64) -> VMetrics {
        VMetrics {
            delta_y: self.delta_y,
            offs_x: width / 2.0,
            offs_y: self.offs_y,
        }
    }
}

/// Collect the entries of `map` accepted by `keep`, in ascending CID order.
pub fn sorted_entries<T: Copy>(
    map: &HashMap<Cid, T>,
    mut keep: impl FnMut(&T) -> bool,
) -> Vec<(Cid, T)> {
    let mut entries: Vec<(Cid, T)> = map
        .iter()
        .filter(|(_, value)| keep(value))
        .map(|(&cid, &value)| (cid, value))
        .collect();
    entries.sort_unstable_by_key(|&(cid, _)| cid);
    entries
}
