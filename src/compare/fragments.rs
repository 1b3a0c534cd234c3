//! Shared-fragment extraction for highlighting overlaps.

use serde::Serialize;
use tracing::debug;

use super::{kmp, order_by_length};

/// A run of chars from the shorter text together with every offset at which
/// it occurs verbatim in the longer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedFragment {
    /// The shared substring.
    pub pattern: String,
    /// Ascending char offsets into the longer text.
    pub positions: Vec<usize>,
}

/// Find non-overlapping shared fragments of at least `min_len` chars.
///
/// Scans start offsets in the shorter text from left to right. At each start
/// the shortest candidate of at least `min_len` chars that occurs in the
/// longer text is accepted and the scan resumes right after it; otherwise
/// the scan moves on by one char. Fragments come out in ascending start
/// order and never overlap within the shorter text.
pub fn extract(a: &[char], b: &[char], min_len: usize) -> Vec<MatchedFragment> {
    let mut fragments = Vec::new();
    let min_len = min_len.max(1);
    let (source, target) = order_by_length(a, b);

    let mut start = 0;
    while start + min_len <= source.len() {
        // Growing a candidate that has no occurrence cannot produce one, so
        // the first length tried decides the whole start offset.
        let candidate = &source[start..start + min_len];
        let positions = kmp::search(target, candidate);

        if positions.is_empty() {
            start += 1;
            continue;
        }

        fragments.push(MatchedFragment {
            pattern: candidate.iter().collect(),
            positions,
        });
        start += min_len;
    }

    debug!(count = fragments.len(), "extracted matched fragments");
    fragments
}
