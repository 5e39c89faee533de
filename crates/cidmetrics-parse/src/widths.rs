//! `/W` and `/DW` codec for CIDFont horizontal widths.
//!
//! The `/W` array has the format:
//! ```text
//! [ c [w1 w2 ...] c_first c_last w ... ]
//! ```
//! Where:
//! - `c [w1 w2 ...]` assigns widths w1, w2, ... to CIDs c, c+1, c+2, ...
//! - `c_first c_last w` assigns width w to all CIDs from c_first to c_last

use cidmetrics_core::{
    DEFAULT_WIDTH, MetricsError, MetricsKey, WidthMap, partition_runs, sorted_entries,
};
use lopdf::{Document, Object};

use crate::codec::{EntryReader, flatten_runs};
use crate::object::{get_array, get_number, kind_name, number_object, wire_number};

/// Encode explicit widths as a `/W` array.
///
/// Widths are compared in their written precision (see [`wire_number`]).
/// Entries equal to `default_width` are omitted. An empty result means every
/// CID uses the default and `/W` should be left out.
pub fn encode_widths(widths: &WidthMap, default_width: f64) -> Vec<Object> {
    let default_width = wire_number(default_width);
    let entries: Vec<_> = sorted_entries(widths, |_| true)
        .into_iter()
        .map(|(cid, w)| (cid, wire_number(w)))
        .filter(|&(_, w)| w != default_width)
        .collect();
    let runs = partition_runs(&entries, |a, b| a == b);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        entries = entries.len(),
        runs = runs.len(),
        "encoded /W array"
    );

    flatten_runs(&runs, |w, out| out.push(number_object(*w)))
}

/// Decode a `/W` array (or a reference to one).
///
/// Every entry is kept as written, including widths equal to `/DW`. Any
/// grammar violation or out-of-range CID fails the whole decode.
pub fn decode_widths(doc: &Document, obj: &Object) -> Result<WidthMap, MetricsError> {
    let items = get_array(doc, obj)?;
    let mut reader = EntryReader::new(doc, items, MetricsKey::W);
    let mut widths = WidthMap::new();

    while let Some(first) = reader.next_start()? {
        match reader.next_after(first)? {
            Object::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    let cid = reader.list_cid(first, i)?;
                    widths.insert(cid, reader.number(value)?);
                }
            }
            Object::Integer(last) => {
                let last = reader.range_end(first, *last)?;
                let width = reader.next_number(first)?;
                for cid in first..=last {
                    widths.insert(cid, width);
                }
            }
            other => {
                return Err(reader.malformed(format!(
                    "expected width array or range end after CID {first}, found {}",
                    kind_name(other)
                )));
            }
        }
    }

    Ok(widths)
}

/// Encode `/DW`, or `None` when it equals the default of 1000.
pub fn encode_default_width(default_width: f64) -> Option<Object> {
    (wire_number(default_width) != DEFAULT_WIDTH).then(|| number_object(default_width))
}

/// Decode `/DW`; absent or non-numeric values fall back to 1000.
pub fn decode_default_width(doc: &Document, obj: Option<&Object>) -> f64 {
    obj.and_then(|o| get_number(doc, o).ok())
        .unwrap_or(DEFAULT_WIDTH)
}
