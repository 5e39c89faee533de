//! Pieces shared by the `/W` and `/W2` codecs: run flattening on the encode
//! side, and a token reader with the CID bounds checks on the decode side.

use cidmetrics_core::{Cid, MAX_CID, MAX_RANGE_SPAN, MetricsError, MetricsKey, Run};
use lopdf::{Document, Object};

use crate::object::{get_number, kind_name, resolve};

/// Flatten runs into a PDF array body.
///
/// Range runs write `first last` followed by the value once; list runs write
/// `first [...]` with every value flattened into the inner array.
pub(crate) fn flatten_runs<T>(runs: &[Run<T>], flatten: impl Fn(&T, &mut Vec<Object>)) -> Vec<Object> {
    let mut out = Vec::new();
    for run in runs {
        match run {
            Run::Range { first, last, value } => {
                out.push(Object::Integer(i64::from(*first)));
                out.push(Object::Integer(i64::from(*last)));
                flatten(value, &mut out);
            }
            Run::List { first, values } => {
                out.push(Object::Integer(i64::from(*first)));
                let mut inner = Vec::new();
                for value in values {
                    flatten(value, &mut inner);
                }
                out.push(Object::Array(inner));
            }
        }
    }
    out
}

/// Sequential reader over the elements of a `/W` or `/W2` array.
pub(crate) struct EntryReader<'a> {
    doc: &'a Document,
    items: &'a [Object],
    pos: usize,
    key: MetricsKey,
}

impl<'a> EntryReader<'a> {
    pub(crate) fn new(doc: &'a Document, items: &'a [Object], key: MetricsKey) -> Self {
        Self {
            doc,
            items,
            pos: 0,
            key,
        }
    }

    /// Read the first CID of the next entry, or `None` at the end of the array.
    pub(crate) fn next_start(&mut self) -> Result<Option<Cid>, MetricsError> {
        let Some(obj) = self.items.get(self.pos) else {
            return Ok(None);
        };
        self.pos += 1;
        match resolve(self.doc, obj) {
            Object::Integer(first) => self.cid(*first).map(Some),
            other => Err(self.malformed(format!(
                "expected CID at element {}, found {}",
                self.pos - 1,
                kind_name(other)
            ))),
        }
    }

    /// Read the element following an entry's first CID, resolved.
    pub(crate) fn next_after(&mut self, first: Cid) -> Result<&'a Object, MetricsError> {
        let Some(obj) = self.items.get(self.pos) else {
            return Err(self.malformed(format!("entry for CID {first} is truncated")));
        };
        self.pos += 1;
        Ok(resolve(self.doc, obj))
    }

    /// Read one numeric value of a range entry starting at `first`.
    pub(crate) fn next_number(&mut self, first: Cid) -> Result<f64, MetricsError> {
        let Some(obj) = self.items.get(self.pos) else {
            return Err(self.malformed(format!("range starting at CID {first} is truncated")));
        };
        self.pos += 1;
        get_number(self.doc, obj)
    }

    /// Read a numeric list element.
    pub(crate) fn number(&self, obj: &Object) -> Result<f64, MetricsError> {
        get_number(self.doc, obj)
    }

    /// Validate the bounds of a range entry `first last ...`.
    pub(crate) fn range_end(&self, first: Cid, last: i64) -> Result<Cid, MetricsError> {
        let start = i64::from(first);
        if last < start {
            return Err(self.malformed(format!("range end {last} precedes start {first}")));
        }
        if last - start > MAX_RANGE_SPAN {
            return Err(self.malformed(format!(
                "range {first}..{last} spans more than {MAX_RANGE_SPAN} CIDs"
            )));
        }
        self.cid(last)
    }

    /// The CID of element `index` of a list entry starting at `first`.
    pub(crate) fn list_cid(&self, first: Cid, index: usize) -> Result<Cid, MetricsError> {
        u32::try_from(index)
            .ok()
            .and_then(|offset| u32::from(first).checked_add(offset))
            .filter(|&cid| cid <= MAX_CID)
            .and_then(|cid| Cid::try_from(cid).ok())
            .ok_or_else(|| {
                self.malformed(format!(
                    "list starting at CID {first} runs past CID {MAX_CID}"
                ))
            })
    }

    pub(crate) fn malformed(&self, detail: impl Into<String>) -> MetricsError {
        MetricsError::malformed(self.key, detail)
    }

    fn cid(&self, value: i64) -> Result<Cid, MetricsError> {
        Cid::try_from(value)
            .map_err(|_| self.malformed(format!("CID {value} outside 0..={MAX_CID}")))
    }
}
