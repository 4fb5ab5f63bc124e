// src/matcher/policy.rs

use super::similarity::{contained_ignoring_spaces, is_multi_word, ratio, word_overlap};
use crate::config::consts::{
    COMPOSITE_THRESHOLD, CONJUNCTION, CONJUNCTION_SCORE, PART_SIMILARITY_MIN,
    SIMPLE_THRESHOLD, SINGLE_WORD_WEIGHT, WORD_OVERLAP_MIN,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Policy {
    /// Plain similarity ratio. Used for person names.
    Simple,
    /// Max of similarity, containment and conjunction signals. Used for event titles.
    Composite,
}

impl Policy {
    /// Scores must be strictly above this to count as a match.
    pub fn threshold(self) -> f64 {
        match self {
            Policy::Simple => SIMPLE_THRESHOLD,
            Policy::Composite => COMPOSITE_THRESHOLD,
        }
    }

    /// Score of one anchor against the query, in `[0, 1]`.
    pub fn score(self, query: &str, anchor: &str) -> f64 {
        match self {
            Policy::Simple => ratio(query, anchor),
            Policy::Composite => composite(query, anchor),
        }
    }
}

fn composite(query: &str, anchor: &str) -> f64 {
    let multi = is_multi_word(anchor);

    let weighted = ratio(query, anchor) * if multi { 1.0 } else { SINGLE_WORD_WEIGHT };
    let containment = if multi && contained_ignoring_spaces(query, anchor) { 1.0 } else { 0.0 };
    let conjunction = conjunction_score(query, anchor);

    weighted.max(containment).max(conjunction)
}

/// A title like "X و Y" can refer to either side on its own.
fn conjunction_score(query: &str, anchor: &str) -> f64 {
    let part_hit = query
        .split(CONJUNCTION)
        .any(|part| ratio(part, anchor) > PART_SIMILARITY_MIN);

    if part_hit && word_overlap(query, anchor) > WORD_OVERLAP_MIN {
        CONJUNCTION_SCORE
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_containment_scores_zero() {
        // "x" is inside "xyz", but single-word anchors never get containment credit
        assert!(contained_ignoring_spaces("xyz", "x"));
        let s = Policy::Composite.score("xyz", "x");
        assert!(s < 1.0);
        assert_eq!(s, ratio("xyz", "x") * SINGLE_WORD_WEIGHT);
    }

    #[test]
    fn multi_word_containment_scores_one() {
        let q = "امضای قرارداد ترکمنچای میان ایران و روسیه";
        assert_eq!(Policy::Composite.score(q, "قرارداد ترکمنچای"), 1.0);
    }

    #[test]
    fn conjunction_part_scores_point_nine() {
        // neither side is contained verbatim, but the first part is a near match
        let q = "محمدعلی شاه ق و احمد شاه";
        let a = "محمدعلی شاه";
        assert!(ratio(q.split(CONJUNCTION).next().unwrap(), a) > PART_SIMILARITY_MIN);
        assert_eq!(conjunction_score(q, a), CONJUNCTION_SCORE);
    }

    #[test]
    fn conjunction_needs_word_overlap() {
        // first part is similar by characters, but shares no whole words
        let q = "abcdefgh و zz";
        let a = "abcdefgx";
        assert!(ratio("abcdefgh", a) > PART_SIMILARITY_MIN);
        assert_eq!(conjunction_score(q, a), 0.0);
    }

    #[test]
    fn scores_stay_in_unit_range() {
        let pairs = [
            ("", "a b"),
            ("جنگ و صلح", "جنگ"),
            ("a b c", "a b c d e f"),
            ("کودتای ۲۸ مرداد", "کودتای ۲۸ مرداد ۱۳۳۲"),
        ];
        for (q, a) in pairs {
            for p in [Policy::Simple, Policy::Composite] {
                let s = p.score(q, a);
                assert!((0.0..=1.0).contains(&s), "{p:?} {q} / {a} = {s}");
            }
        }
    }
}
