//! Run partitioning shared by the `/W` and `/W2` encoders.
//!
//! A sorted sequence of `(cid, value)` pairs is split into runs of
//! consecutive CIDs. Each run is emitted either as a [`Run::Range`]
//! (`first last value`, every CID shares one value) or as a [`Run::List`]
//! (`first [v0 v1 ...]`, one value per CID).
//!
//! The partitioning is written once and parameterized by an equality
//! predicate; how a value is flattened into PDF numbers is left to the
//! caller.

use crate::metrics::Cid;

/// One encoded group of consecutive CIDs.
#[derive(Debug, Clone, PartialEq)]
pub enum Run<T> {
    /// CIDs `first..=last` all map to `value`.
    Range {
        /// First CID of the run.
        first: Cid,
        /// Last CID of the run (inclusive).
        last: Cid,
        /// The value shared by every CID in the run.
        value: T,
    },
    /// CID `first + i` maps to `values[i]`.
    List {
        /// First CID of the run.
        first: Cid,
        /// One value per CID.
        values: Vec<T>,
    },
}

impl<T> Run<T> {
    /// First CID covered by this run.
    pub fn first(&self) -> Cid {
        match self {
            Run::Range { first, .. } | Run::List { first, .. } => *first,
        }
    }

    /// Number of CIDs covered by this run.
    pub fn cid_count(&self) -> usize {
        match self {
            Run::Range { first, last, .. } => usize::from(*last) - usize::from(*first) + 1,
            Run::List { values, .. } => values.len(),
        }
    }

    /// Number of values this run writes (before flattening).
    pub fn value_count(&self) -> usize {
        match self {
            Run::Range { .. } => 1,
            Run::List { values, .. } => values.len(),
        }
    }
}

/// Greedy single-pass run accumulator.
///
/// CIDs must be pushed in strictly increasing order. A run is flushed when
/// the next CID is not adjacent, or when more than two equal values have
/// accumulated and the next value differs: at that point range form is
/// already cheaper than any list the run could grow into.
#[derive(Debug)]
pub struct RunBuilder<T, F> {
    eq: F,
    first: Cid,
    last: Cid,
    values: Vec<T>,
    all_equal: bool,
    runs: Vec<Run<T>>,
}

impl<T, F> RunBuilder<T, F>
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
{
    /// Create an empty builder using `eq` to compare values.
    pub fn new(eq: F) -> Self {
        Self {
            eq,
            first: 0,
            last: 0,
            values: Vec::new(),
            all_equal: true,
            runs: Vec::new(),
        }
    }

    /// Add the value for `cid`.
    pub fn push(&mut self, cid: Cid, value: T) {
        if let Some(common) = self.values.first() {
            debug_assert!(cid > self.last, "CIDs must be strictly increasing");
            let adjacent = u32::from(cid) == u32::from(self.last) + 1;
            let ends_range =
                self.values.len() > 2 && self.all_equal && !(self.eq)(common, &value);
            if !adjacent || ends_range {
                self.flush();
            }
        }

        match self.values.first() {
            None => {
                self.first = cid;
                self.all_equal = true;
            }
            Some(common) => {
                if !(self.eq)(common, &value) {
                    self.all_equal = false;
                }
            }
        }
        self.last = cid;
        self.values.push(value);
    }

    /// Flush the pending run and return all runs in CID order.
    pub fn finish(mut self) -> Vec<Run<T>> {
        self.flush();
        self.runs
    }

    fn flush(&mut self) {
        if self.values.is_empty() {
            return;
        }
        let run = if self.all_equal && self.values.len() > 1 {
            let value = self.values[0];
            self.values.clear();
            Run::Range {
                first: self.first,
                last: self.last,
                value,
            }
        } else {
            Run::List {
                first: self.first,
                values: std::mem::take(&mut self.values),
            }
        };
        self.runs.push(run);
    }
}

/// Partition entries sorted by ascending CID into runs.
pub fn partition_runs<T, F>(entries: &[(Cid, T)], eq: F) -> Vec<Run<T>>
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
{
    let mut builder = RunBuilder::new(eq);
    for &(cid, value) in entries {
        builder.push(cid, value);
    }
    builder.finish()
}
