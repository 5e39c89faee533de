//! `/W2` and `/DW2` codec for CIDFont vertical metrics.
//!
//! The `/W2` array has the format:
//! ```text
//! [ c [w1y v1x v1y w2y v2x v2y ...] c_first c_last w1y v1x v1y ... ]
//! ```
//! where `w1y` is the vertical displacement and `(v1x, v1y)` the position
//! vector of each glyph. `/DW2` is `[vy w1y]`, default `[880 -1000]`.

use cidmetrics_core::{
    DefaultVMetrics, MetricsError, MetricsKey, VMetrics, VMetricsMap, partition_runs,
    sorted_entries,
};
use lopdf::{Document, Object};

use crate::codec::{EntryReader, flatten_runs};
use crate::object::{get_array, get_number, kind_name, number_object, wire_number};

/// Encode explicit vertical metrics as a `/W2` array.
///
/// No entry is dropped: the implicit metrics of a CID depend on its
/// horizontal width, so no triple is redundant in general. An empty result
/// means `/W2` should be left out.
pub fn encode_vmetrics(vmetrics: &VMetricsMap) -> Vec<Object> {
    let entries: Vec<_> = sorted_entries(vmetrics, |_| true)
        .into_iter()
        .map(|(cid, vm)| {
            let vm = VMetrics::new(
                wire_number(vm.delta_y),
                wire_number(vm.offs_x),
                wire_number(vm.offs_y),
            );
            (cid, vm)
        })
        .collect();
    let runs = partition_runs(&entries, |a, b| a == b);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        entries = entries.len(),
        runs = runs.len(),
        "encoded /W2 array"
    );

    flatten_runs(&runs, |vm, out| {
        out.push(number_object(vm.delta_y));
        out.push(number_object(vm.offs_x));
        out.push(number_object(vm.offs_y));
    })
}

/// Decode a `/W2` array (or a reference to one).
///
/// After each first CID, an array introduces a list of triples (its length
/// must be a multiple of 3) and an integer introduces a range followed by
/// exactly one triple. Anything else fails the whole decode.
pub fn decode_vmetrics(doc: &Document, obj: &Object) -> Result<VMetricsMap, MetricsError> {
    let items = get_array(doc, obj)?;
    let mut reader = EntryReader::new(doc, items, MetricsKey::W2);
    let mut vmetrics = VMetricsMap::new();

    while let Some(first) = reader.next_start()? {
        match reader.next_after(first)? {
            Object::Array(values) => {
                if values.len() % 3 != 0 {
                    return Err(reader.malformed(format!(
                        "list for CID {first} has {} numbers, not a multiple of 3",
                        values.len()
                    )));
                }
                for (i, triple) in values.chunks_exact(3).enumerate() {
                    let cid = reader.list_cid(first, i)?;
                    let vm = VMetrics::new(
                        reader.number(&triple[0])?,
                        reader.number(&triple[1])?,
                        reader.number(&triple[2])?,
                    );
                    vmetrics.insert(cid, vm);
                }
            }
            Object::Integer(last) => {
                let last = reader.range_end(first, *last)?;
                let delta_y = reader.next_number(first)?;
                let offs_x = reader.next_number(first)?;
                let offs_y = reader.next_number(first)?;
                let vm = VMetrics::new(delta_y, offs_x, offs_y);
                for cid in first..=last {
                    vmetrics.insert(cid, vm);
                }
            }
            other => {
                return Err(reader.malformed(format!(
                    "expected metrics array or range end after CID {first}, found {}",
                    kind_name(other)
                )));
            }
        }
    }

    Ok(vmetrics)
}

/// Encode `/DW2`, or `None` when it equals the default `[880 -1000]`.
pub fn encode_default_vmetrics(default: &DefaultVMetrics) -> Option<Object> {
    let written = DefaultVMetrics {
        offs_y: wire_number(default.offs_y),
        delta_y: wire_number(default.delta_y),
    };
    if written.is_default() {
        return None;
    }
    Some(Object::Array(vec![
        number_object(default.offs_y),
        number_object(default.delta_y),
    ]))
}

/// Decode `/DW2`.
///
/// Only a one- or two-element array of numbers is honored: the first element
/// sets the vertical origin and the second, if present, the displacement.
/// Anything else, including a partially numeric array, gives the default.
pub fn decode_default_vmetrics(doc: &Document, obj: Option<&Object>) -> DefaultVMetrics {
    let mut default = DefaultVMetrics::default();
    let Some(items) = obj.and_then(|o| get_array(doc, o).ok()) else {
        return default;
    };
    if items.is_empty() || items.len() > 2 {
        return default;
    }
    let Ok(numbers) = items
        .iter()
        .map(|o| get_number(doc, o))
        .collect::<Result<Vec<f64>, _>>()
    else {
        return default;
    };
    default.offs_y = numbers[0];
    if let Some(&delta_y) = numbers.get(1) {
        default.delta_y = delta_y;
    }
    default
}
