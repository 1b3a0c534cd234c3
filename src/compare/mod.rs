//! Text comparison engine.
//!
//! Three scoring algorithms and a shared-fragment extractor, all pure
//! functions over char sequences.
//!
//! # Algorithms
//!
//! | Tag | Scorer |
//! |---|---|
//! | `levenshtein` | `1 - distance / max_len`, as a percentage |
//! | `rabin-karp` | windowed scorer over the rolling-hash search |
//! | `kmp` | windowed scorer over the prefix-function search |
//!
//! Scores are percentages in `[0, 100]`. Lengths and offsets are counted in
//! chars, not bytes.

pub mod fragments;
pub mod kmp;
pub mod levenshtein;
pub mod rabin_karp;
pub mod window;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::debug;

use crate::error::{CompareError, CompareResult};

pub use fragments::MatchedFragment;

/// Default upper bound on the windowed scorer's window length.
pub const DEFAULT_MAX_WINDOW_LEN: usize = 10;

/// Default minimum length of an extracted fragment.
pub const DEFAULT_MIN_FRAGMENT_LEN: usize = 4;

/// Similarity algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Levenshtein,
    RabinKarp,
    Kmp,
}

impl Algorithm {
    /// Every supported algorithm, in advertised order.
    pub const ALL: [Self; 3] = [Self::Levenshtein, Self::RabinKarp, Self::Kmp];

    /// Canonical wire tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Levenshtein => "levenshtein",
            Self::RabinKarp => "rabin-karp",
            Self::Kmp => "kmp",
        }
    }

    /// The search engine behind a windowed algorithm, `None` for Levenshtein.
    pub const fn search_strategy(self) -> Option<SearchStrategy> {
        match self {
            Self::Levenshtein => None,
            Self::RabinKarp => Some(SearchStrategy::RollingHash),
            Self::Kmp => Some(SearchStrategy::PrefixFunction),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "levenshtein" => Ok(Self::Levenshtein),
            "rabin-karp" => Ok(Self::RabinKarp),
            "kmp" => Ok(Self::Kmp),
            _ => Err(CompareError::InvalidAlgorithm { tag: s.to_owned() }),
        }
    }
}

/// Exact substring search engine injected into the windowed scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Rabin-Karp.
    RollingHash,
    /// Knuth-Morris-Pratt.
    PrefixFunction,
}

impl SearchStrategy {
    /// All start offsets of `pattern` in `text`, ascending.
    pub fn search(self, text: &[char], pattern: &[char]) -> Vec<usize> {
        match self {
            Self::RollingHash => rabin_karp::search(text, pattern),
            Self::PrefixFunction => kmp::search(text, pattern),
        }
    }
}

/// Split two texts into `(pattern source, search text)`.
///
/// The shorter text is the source. On a length tie the lexicographically
/// smaller one is, so swapping the arguments never changes the pairing.
pub(crate) fn order_by_length<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    if (a.len(), a) <= (b.len(), b) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Tunables for a [`Comparator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareConfig {
    /// Upper bound on the windowed scorer's window length.
    pub max_window_len: usize,
    /// Minimum length of an extracted fragment.
    pub min_fragment_len: usize,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            max_window_len: DEFAULT_MAX_WINDOW_LEN,
            min_fragment_len: DEFAULT_MIN_FRAGMENT_LEN,
        }
    }
}

impl CompareConfig {
    /// Reject zero-length windows and fragments.
    pub fn validate(&self) -> CompareResult<()> {
        if self.max_window_len == 0 {
            return Err(CompareError::InvalidConfig(
                "max_window_len must be at least 1".to_owned(),
            ));
        }
        if self.min_fragment_len == 0 {
            return Err(CompareError::InvalidConfig(
                "min_fragment_len must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Result of a full analysis: one score plus the fragments to highlight.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub similarity: f64,
    pub matched_patterns: Vec<MatchedFragment>,
}

impl AnalysisReport {
    /// Serialize to the compact JSON document returned by the `analyze` tool.
    pub fn to_json(&self) -> CompareResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Stateless comparison engine with validated settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    /// Create a comparator, rejecting invalid settings.
    pub fn new(config: CompareConfig) -> CompareResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Similarity percentage of two texts under `algorithm`, in `[0, 100]`.
    pub fn similarity(&self, text1: &str, text2: &str, algorithm: Algorithm) -> f64 {
        let a: Vec<char> = text1.chars().collect();
        let b: Vec<char> = text2.chars().collect();

        let score = match algorithm.search_strategy() {
            None => levenshtein::similarity(&a, &b),
            Some(strategy) => window::similarity(&a, &b, strategy, self.config.max_window_len),
        };

        debug!(algorithm = %algorithm, score, "computed similarity");
        score.clamp(0.0, 100.0)
    }

    /// Shared fragments of two texts, in ascending order within the shorter.
    pub fn matched_patterns(&self, text1: &str, text2: &str) -> Vec<MatchedFragment> {
        let a: Vec<char> = text1.chars().collect();
        let b: Vec<char> = text2.chars().collect();
        fragments::extract(&a, &b, self.config.min_fragment_len)
    }

    /// Score and fragments together. The two are computed independently.
    pub fn analyze(&self, text1: &str, text2: &str, algorithm: Algorithm) -> AnalysisReport {
        AnalysisReport {
            similarity: self.similarity(text1, text2, algorithm),
            matched_patterns: self.matched_patterns(text1, text2),
        }
    }
}

/// Similarity percentage of two texts under the algorithm named by `tag`.
///
/// # Errors
///
/// [`CompareError::InvalidAlgorithm`] if `tag` is not a known algorithm.
pub fn compute_similarity(text1: &str, text2: &str, tag: &str) -> CompareResult<f64> {
    let algorithm: Algorithm = tag.parse()?;
    Ok(Comparator::default().similarity(text1, text2, algorithm))
}

/// Shared fragments (at least four chars) between two texts. Never fails.
pub fn extract_matched_patterns(text1: &str, text2: &str) -> Vec<MatchedFragment> {
    Comparator::default().matched_patterns(text1, text2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_tags() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<Algorithm>().ok(), Some(algorithm));
        }
    }

    #[test]
    fn test_algorithm_tags_match_exactly() {
        for tag in ["KMP", " Levenshtein ", "levenshtein ", "rabinkarp", "rabin_karp", "RABIN_KARP", ""] {
            let err = compute_similarity("abcd", "abcd", tag).expect_err("non-canonical tag");
            assert!(
                matches!(err, CompareError::InvalidAlgorithm { tag: ref t } if t == tag),
                "{tag:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_algorithm() {
        let err = compute_similarity("a", "b", "soundex").expect_err("unknown tag");
        assert!(matches!(err, CompareError::InvalidAlgorithm { ref tag } if tag == "soundex"));
        assert_eq!(err.to_string(), "invalid algorithm: soundex");
    }

    #[test]
    fn test_levenshtein_edges() {
        let s = compute_similarity("", "", "levenshtein").expect("valid tag");
        assert!((s - 100.0).abs() < f64::EPSILON);
        let s = compute_similarity("", "abc", "levenshtein").expect("valid tag");
        assert!(s.abs() < f64::EPSILON);
        let s = compute_similarity("kitten", "sitting", "levenshtein").expect("valid tag");
        assert!((s - 57.142_857).abs() < 1e-4);
    }

    #[test]
    fn test_order_by_length_tie_break() {
        let a: Vec<char> = "bbbb".chars().collect();
        let b: Vec<char> = "aaaa".chars().collect();
        assert_eq!(order_by_length(&a, &b), order_by_length(&b, &a));
        assert_eq!(order_by_length(&a, &b).0, &b[..]);
    }

    #[test]
    fn test_config_validation() {
        assert!(Comparator::new(CompareConfig::default()).is_ok());
        let bad = CompareConfig {
            max_window_len: 0,
            ..CompareConfig::default()
        };
        assert!(matches!(Comparator::new(bad), Err(CompareError::InvalidConfig(_))));
        let bad = CompareConfig {
            min_fragment_len: 0,
            ..CompareConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_custom_fragment_length() {
        let comparator = Comparator::new(CompareConfig {
            min_fragment_len: 6,
            ..CompareConfig::default()
        })
        .expect("valid config");
        let frags = comparator.matched_patterns("shared text", "we shared text here");
        assert_eq!(frags[0].pattern, "shared");
    }

    #[test]
    fn test_report_json_shape() {
        let report = Comparator::default().analyze("abcdef", "xxabcdxx", Algorithm::Kmp);
        let json: serde_json::Value = serde_json::from_str(&report.to_json().expect("serialize")).expect("parse");
        assert!(json["similarity"].is_number());
        assert_eq!(json["matchedPatterns"][0]["pattern"], "abcd");
        assert_eq!(json["matchedPatterns"][0]["positions"][0], 2);
    }
}
