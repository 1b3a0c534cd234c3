//! Rabin-Karp exact substring search.
//!
//! Polynomial rolling hash with radix 256 over a modulus of 101. The small
//! modulus collides often; every hash hit is verified char by char before it
//! is reported.

/// Hash modulus.
const PRIME: u64 = 101;

/// Hash radix (alphabet size).
const RADIX: u64 = 256;

/// Reduce a char to its residue under [`PRIME`].
///
/// Chars above the byte range hash by scalar value, which keeps the
/// recurrence a valid polynomial hash for any Unicode input.
fn residue(c: char) -> u64 {
    u64::from(u32::from(c)) % PRIME
}

/// Return every start offset at which `pattern` occurs in `text`.
///
/// Offsets are ascending. An empty pattern, or one longer than `text`,
/// yields no matches.
pub fn search(text: &[char], pattern: &[char]) -> Vec<usize> {
    let n = text.len();
    let m = pattern.len();
    let mut matches = Vec::new();

    if m == 0 || m > n {
        return matches;
    }

    // h = RADIX^(m-1) mod PRIME, the weight of the leaving char.
    let h = (1..m).fold(1, |acc, _| (acc * RADIX) % PRIME);

    let mut pattern_hash = 0;
    let mut window_hash = 0;
    for (&p, &t) in pattern.iter().zip(text) {
        pattern_hash = (RADIX * pattern_hash + residue(p)) % PRIME;
        window_hash = (RADIX * window_hash + residue(t)) % PRIME;
    }

    for i in 0..=n - m {
        if pattern_hash == window_hash && text[i..i + m] == *pattern {
            matches.push(i);
        }

        if i < n - m {
            // Adding PRIME before subtracting keeps the value non-negative.
            let leaving = (residue(text[i]) * h) % PRIME;
            window_hash = (RADIX * (window_hash + PRIME - leaving) + residue(text[i + m])) % PRIME;
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(text: &str, pattern: &str) -> Vec<usize> {
        let t: Vec<char> = text.chars().collect();
        let p: Vec<char> = pattern.chars().collect();
        search(&t, &p)
    }

    #[test]
    fn test_finds_overlapping_matches() {
        assert_eq!(find("ababcabab", "abab"), vec![0, 5]);
        assert_eq!(find("aaaa", "aa"), vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_or_oversized_pattern() {
        assert!(find("abc", "").is_empty());
        assert!(find("abc", "abcd").is_empty());
        assert!(find("", "a").is_empty());
    }

    #[test]
    fn test_whole_text_match() {
        assert_eq!(find("needle", "needle"), vec![0]);
    }

    #[test]
    fn test_collisions_are_verified() {
        // With a modulus of 101 many windows share the pattern's hash; only
        // real matches may be reported.
        let text: String = (0..2000u32)
            .map(|i| char::from(b'a' + u8::try_from(i % 26).unwrap_or(0)))
            .collect();
        let hits = find(&text, "xyz");
        assert!(!hits.is_empty());
        for &i in &hits {
            assert_eq!(&text[i..i + 3], "xyz");
        }
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(find("über über", "über"), vec![0, 5]);
    }
}
