//! Hierarchical instance/pin name with optional bit index

use compact_str::CompactString;
use std::fmt;
use itertools::Itertools;

/// A slash-delimited hierarchical name, e.g. `u_core/u_alu/U12/Y`.
///
/// Segments are kept verbatim, so a trailing bus index such as
/// `data_q[3]` stays on the last segment. Use [`HierName::bit_index`]
/// and [`HierName::without_index`] to look at it separately.
#[derive(Hash, Clone, PartialEq, Eq)]
pub struct HierName(pub Vec<CompactString>);

impl fmt::Display for HierName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().format("/"))
    }
}

impl fmt::Debug for HierName {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl HierName {
    /// Split a name on `/`.
    #[inline]
    pub fn parse(name: &str) -> HierName {
        HierName(name.split('/').map(CompactString::from).collect())
    }

    /// The top-level segment, which names the hop.
    #[inline]
    pub fn first(&self) -> &str {
        self.0.first().map(|s| s.as_str()).unwrap_or("")
    }

    /// The last segment, which names the pin or port.
    #[inline]
    pub fn leaf(&self) -> &str {
        self.0.last().map(|s| s.as_str()).unwrap_or("")
    }

    /// The `k` of a trailing `[k]`, if present.
    pub fn bit_index(&self) -> Option<i32> {
        split_index(self.leaf()).1
    }

    /// The same name with a trailing `[k]` removed.
    pub fn without_index(&self) -> HierName {
        let mut segs = self.0.clone();
        if let Some(last) = segs.last_mut() {
            if let (body, Some(_)) = split_index(last) {
                *last = body.into();
            }
        }
        HierName(segs)
    }
}

/// Top-level segment of a name without building a [`HierName`].
#[inline]
pub fn head(name: &str) -> &str {
    name.split('/').next().unwrap_or("")
}

/// Split `body[k]` into `(body, Some(k))`.
fn split_index(seg: &str) -> (&str, Option<i32>) {
    if let Some(body) = seg.strip_suffix(']') {
        if let Some(open) = body.rfind('[') {
            if let Ok(i) = body[open + 1..].parse() {
                return (&body[..open], Some(i));
            }
        }
    }
    (seg, None)
}
