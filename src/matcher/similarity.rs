// src/matcher/similarity.rs

// Scoring primitives shared by both match policies.

/// Normalized similarity in `[0, 1]`: `2 * LCS / (len(a) + len(b))`, counted in chars.
/// Symmetric; 1.0 iff the strings are identical (two empty strings included).
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Longest common subsequence length, two-row DP.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    // keep the shorter side in the row
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; short.len() + 1];
    let mut cur = vec![0usize; short.len() + 1];

    for &lc in long {
        for (j, &sc) in short.iter().enumerate() {
            cur[j + 1] = if lc == sc {
                prev[j] + 1
            } else {
                cur[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[short.len()]
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

pub fn is_multi_word(s: &str) -> bool {
    word_count(s) > 1
}

/// Fraction of `anchor`'s distinct words that also occur in `query`.
pub fn word_overlap(query: &str, anchor: &str) -> f64 {
    use std::collections::HashSet;

    let in_anchor: HashSet<&str> = anchor.split_whitespace().collect();
    if in_anchor.is_empty() {
        return 0.0;
    }
    let in_query: HashSet<&str> = query.split_whitespace().collect();
    let shared = in_anchor.intersection(&in_query).count();
    shared as f64 / in_anchor.len() as f64
}

/// `needle` occurs in `haystack` once ASCII spaces are dropped from both.
pub fn contained_ignoring_spaces(haystack: &str, needle: &str) -> bool {
    let h = haystack.replace(' ', "");
    let n = needle.replace(' ', "");
    h.contains(&n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_identity_and_symmetry() {
        assert_eq!(ratio("جنگ جهانی دوم", "جنگ جهانی دوم"), 1.0);
        assert_eq!(ratio("", ""), 1.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("kitten", "sitting"), ratio("sitting", "kitten"));
    }

    #[test]
    fn ratio_counts_chars_not_bytes() {
        // 3 shared chars out of 3 + 13
        let r = ratio("جنگ", "جنگ جهانی دوم");
        assert!((r - 6.0 / 16.0).abs() < 1e-12, "got {r}");
    }

    #[test]
    fn ratio_exact_fraction() {
        // LCS 4, total 10
        assert_eq!(ratio("abcd", "abcdxy"), 0.8);
    }

    #[test]
    fn overlap_uses_anchor_words() {
        assert_eq!(word_overlap("a b c", "a b"), 1.0);
        assert_eq!(word_overlap("a x", "a b"), 0.5);
        assert_eq!(word_overlap("a b", "   "), 0.0);
    }

    #[test]
    fn containment_drops_spaces() {
        assert!(contained_ignoring_spaces("انقلاب  ایران آغاز شد", "انقلاب ایران"));
        assert!(contained_ignoring_spaces("ab cd", "abc"));
        assert!(!contained_ignoring_spaces("ab", "abc"));
    }
}
