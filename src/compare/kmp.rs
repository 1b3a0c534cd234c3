//! Knuth-Morris-Pratt exact substring search.
//!
//! Used both as a similarity engine and by the fragment extractor.

/// Build the failure table (longest proper prefix that is also a suffix)
/// for `pattern`.
///
/// `table[i]` is the length of the longest proper prefix of `pattern` that
/// is also a suffix of `pattern[..=i]`. The table has one entry per char.
pub fn failure_table(pattern: &[char]) -> Vec<usize> {
    let m = pattern.len();
    let mut table = vec![0; m];

    let mut len = 0;
    let mut i = 1;

    while i < m {
        if pattern[i] == pattern[len] {
            len += 1;
            table[i] = len;
            i += 1;
        } else if len != 0 {
            len = table[len - 1];
        } else {
            table[i] = 0;
            i += 1;
        }
    }

    table
}

/// Return every start offset at which `pattern` occurs in `text`.
///
/// Runs in `O(text.len() + pattern.len())` and never moves backwards in
/// `text`. An empty pattern, or one longer than `text`, yields no matches.
pub fn search(text: &[char], pattern: &[char]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();
    let mut matches = Vec::new();

    if m == 0 || m > n {
        return matches;
    }

    let table = failure_table(pattern);

    let mut i = 0; // text cursor
    let mut j = 0; // pattern cursor

    while i < n {
        if text[i] == pattern[j] {
            i += 1;
            j += 1;

            if j == m {
                matches.push(i - m);
                j = table[m - 1];
            }
        } else if j != 0 {
            j = table[j - 1];
        } else {
            i += 1;
        }
    }

    matches
}
