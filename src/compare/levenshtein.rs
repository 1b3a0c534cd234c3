//! Levenshtein edit distance algorithm.
//!
//! Scores the `levenshtein` algorithm tag. Substitution, insertion and
//! deletion each cost 1, so the distance is symmetric.

/// Compute the Levenshtein edit distance between two char sequences.
///
/// Returns the minimum number of single-character edits (insertions,
/// deletions, substitutions) required to transform `a` into `b`. The result
/// never exceeds `max(a.len(), b.len())`.
pub fn distance(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows of the (m+1)x(n+1) grid are enough: each cell reads only the
    // row above and the cell to its left.
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j] // deletion
                    .min(curr[j - 1]) // insertion
                    .min(prev[j - 1]) // substitution
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Similarity percentage between two char sequences (0.0 = completely
/// different, 100.0 = identical).
///
/// Two empty inputs are identical. If exactly one is empty the distance
/// equals the other's length and the score is 0.0.
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &[char], b: &[char]) -> f64 {
    let max_len = a.len().max(b.len());
    if max_len == 0 {
        return 100.0;
    }
    let dist = distance(a, b);
    (1.0 - (dist as f64 / max_len as f64)) * 100.0
}
