//! Path selection and start/end deduplication.

use crate::error::{ Result, StaError };
use crate::hier::HierName;
use crate::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// Bit-blasted register suffixes, e.g. `_3_`, `[3]`, `_3__5_`.
    static ref REG_BIT_SUFFIX: Regex = Regex::new(r"(?:\[\d+\]|_\d+_)+$")
        .expect("failed to compile register suffix regex");
}

/// Which path ids to consider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSet {
    /// Exactly these ids, in this order.
    Explicit(Vec<usize>),
    /// The first `n` paths.
    Limit(usize),
    /// Every path.
    All,
}

/// What to do with an explicit id that does not exist.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutOfRange {
    /// Fail the whole selection on the first bad id.
    #[default]
    Abort,
    /// Warn and leave the id out.
    Skip,
}

/// A resolved user request for paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub set: PathSet,
    /// Keep only the first path of each start/end combination.
    pub unique: bool,
    pub out_of_range: OutOfRange,
}

impl Selection {
    /// Build a selection the way the command line does: explicit
    /// ids win, then `all`, then the `max` limit.
    pub fn new(ids: Vec<usize>, max: usize, all: bool, unique: bool) -> Selection {
        let set = if !ids.is_empty() {
            PathSet::Explicit(ids)
        }
        else if all {
            PathSet::All
        }
        else {
            PathSet::Limit(max)
        };
        Selection { set, unique, out_of_range: OutOfRange::Abort }
    }

    /// Candidate ids for a report with `len` paths, before
    /// deduplication.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>> {
        match &self.set {
            PathSet::Explicit(ids) => {
                let mut ret = Vec::with_capacity(ids.len());
                for &id in ids {
                    if id < len {
                        ret.push(id);
                    }
                    else if self.out_of_range == OutOfRange::Skip {
                        clilog::warn!(
                            STA_SKIP_ID,
                            "skipping path id {} (report has {} paths)",
                            id, len
                        );
                    }
                    else {
                        return Err(StaError::IndexOutOfRange { id, len });
                    }
                }
                Ok(ret)
            }
            PathSet::Limit(n) => Ok((0..len.min(*n)).collect()),
            PathSet::All => Ok((0..len).collect())
        }
    }

    /// Pick paths, keeping their original ids.
    pub fn apply<'p>(&self, paths: &'p [Path]) -> Result<Vec<(usize, &'p Path)>> {
        let ids = self.indices(paths.len())?;
        let mut seen = HashSet::new();
        Ok(ids.into_iter()
           .map(|i| (i, &paths[i]))
           .filter(|(_, p)| !self.unique || seen.insert(dedup_key(p)))
           .collect())
    }
}

/// Start/end combination used for deduplication.
pub fn dedup_key(path: &Path) -> (String, String) {
    (normalize_start(&path.startpoint), normalize_end(&path.endpoint))
}

/// Drop a trailing `[k]` from a startpoint.
pub fn normalize_start(startpoint: &str) -> String {
    HierName::parse(startpoint).without_index().to_string()
}

/// Drop a trailing register bit index from an endpoint.
pub fn normalize_end(endpoint: &str) -> String {
    REG_BIT_SUFFIX.replace(endpoint, "").into_owned()
}
