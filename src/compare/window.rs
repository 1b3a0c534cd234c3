//! Windowed similarity scoring.
//!
//! Samples fixed-length windows from the shorter text, counts how often each
//! occurs in the longer text, and normalises the count into a percentage.
//! The same scaffold serves both Rabin-Karp and KMP; only the injected
//! [`SearchStrategy`] differs.

use super::{SearchStrategy, order_by_length};

/// Score `a` against `b` with the given search engine.
///
/// `max_window_len` caps the window length; it must be at least 1. The
/// stride is half the window, but never less than 1, so the scan always
/// terminates.
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &[char], b: &[char], strategy: SearchStrategy, max_window_len: usize) -> f64 {
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 100.0 } else { 0.0 };
    }

    let (source, target) = order_by_length(a, b);

    let window = max_window_len.max(1).min(source.len());
    let stride = (window / 2).max(1);

    let total_matches: usize = (0..=source.len() - window)
        .step_by(stride)
        .map(|start| strategy.search(target, &source[start..start + window]).len())
        .sum();

    let max_possible_matches = source.len() as f64 / stride as f64;
    (total_matches as f64 / max_possible_matches * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRATEGIES: [SearchStrategy; 2] =
        [SearchStrategy::RollingHash, SearchStrategy::PrefixFunction];

    fn score(a: &str, b: &str, strategy: SearchStrategy) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        similarity(&a, &b, strategy, 10)
    }

    #[test]
    fn test_empty_inputs() {
        for s in STRATEGIES {
            assert!((score("", "", s) - 100.0).abs() < f64::EPSILON);
            assert!(score("", "abc", s).abs() < f64::EPSILON);
            assert!(score("abc", "", s).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_single_char_source_terminates() {
        // Window 1 would give a zero stride without the clamp.
        for s in STRATEGIES {
            assert!((score("a", "banana", s) - 100.0).abs() < f64::EPSILON);
            assert!(score("z", "banana", s).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_identical_texts_saturate() {
        // 20 chars, window 10, stride 5: windows at 0, 5, 10 each match once,
        // out of 20 / 5 = 4 possible.
        let text = "the quick brown fox!";
        for s in STRATEGIES {
            assert!((score(text, text, s) - 75.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_short_source_within_longer_text() {
        // Source "abcd": window 4, stride 2, one window at 0 that occurs once;
        // 4 / 2 = 2 possible, so 50%.
        for s in STRATEGIES {
            assert!((score("abcd", "xxabcdxx", s) - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_repeated_hits_are_capped() {
        for s in STRATEGIES {
            let v = score("abab", "abababababababab", s);
            assert!((v - 100.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_engines_agree() {
        let a = "plagiarism detection compares student answers";
        let b = "detection of plagiarism in student answers compares text";
        let rk = score(a, b, SearchStrategy::RollingHash);
        let kmp = score(a, b, SearchStrategy::PrefixFunction);
        assert!((rk - kmp).abs() < f64::EPSILON);
        assert!(rk > 0.0 && rk <= 100.0);
    }

    #[test]
    fn test_argument_order_independent() {
        for s in STRATEGIES {
            assert!((score("abcdefgh", "hgfedcba", s) - score("hgfedcba", "abcdefgh", s)).abs() < f64::EPSILON);
            assert!((score("short", "a much longer short text", s)
                - score("a much longer short text", "short", s))
                .abs()
                < f64::EPSILON);
        }
    }
}
