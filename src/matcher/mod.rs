// src/matcher/mod.rs

// Fuzzy link reconciliation: pick the one candidate URL a title or name refers to.

pub mod similarity;
mod policy;

use serde::{Deserialize, Serialize};

pub use policy::Policy;

/// One hyperlink harvested from a source document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "text")]
    pub anchor_text: String,
    pub url: String,
}

impl Candidate {
    pub fn new(anchor_text: impl Into<String>, url: impl Into<String>) -> Self {
        Self { anchor_text: anchor_text.into(), url: url.into() }
    }
}

/// A candidate as it came out of upstream parsing; either field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(rename = "text", default, skip_serializing_if = "Option::is_none")]
    pub anchor_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<Candidate> for RawCandidate {
    fn from(c: Candidate) -> Self {
        Self { anchor_text: Some(c.anchor_text), url: Some(c.url) }
    }
}

/// Anything the matcher can score. `None` marks a malformed entry, which is skipped.
pub trait AsCandidate {
    fn parts(&self) -> Option<(&str, &str)>;
}

fn well_formed<'a>(text: &'a str, url: &'a str) -> Option<(&'a str, &'a str)> {
    if text.trim().is_empty() || url.trim().is_empty() {
        None
    } else {
        Some((text, url))
    }
}

impl AsCandidate for Candidate {
    fn parts(&self) -> Option<(&str, &str)> {
        well_formed(&self.anchor_text, &self.url)
    }
}

impl AsCandidate for RawCandidate {
    fn parts(&self) -> Option<(&str, &str)> {
        well_formed(self.anchor_text.as_deref()?, self.url.as_deref()?)
    }
}

impl<T: AsCandidate + ?Sized> AsCandidate for &T {
    fn parts(&self) -> Option<(&str, &str)> {
        (**self).parts()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum MatchResult {
    Matched { url: String, score: f64 },
    NoMatch,
}

impl MatchResult {
    pub fn url(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { url, .. } => Some(url),
            MatchResult::NoMatch => None,
        }
    }

    pub fn into_url(self) -> Option<String> {
        match self {
            MatchResult::Matched { url, .. } => Some(url),
            MatchResult::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }
}

/// Stateless matcher bound to one scoring policy. `Copy`, so share it freely across workers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkMatcher {
    policy: Policy,
}

impl LinkMatcher {
    pub const fn new(policy: Policy) -> Self {
        Self { policy }
    }

    /// Person-name matching (accept above 0.8).
    pub const fn simple() -> Self {
        Self::new(Policy::Simple)
    }

    /// Event-title matching (accept above 0.5).
    pub const fn composite() -> Self {
        Self::new(Policy::Composite)
    }

    /// Best candidate for `query`, or `NoMatch` when nothing clears the threshold.
    /// Malformed entries are skipped. On equal scores the earliest candidate wins.
    pub fn resolve<C: AsCandidate>(&self, query: &str, candidates: &[C]) -> MatchResult {
        let mut best: Option<(&str, f64)> = None;

        for (text, url) in candidates.iter().filter_map(AsCandidate::parts) {
            let score = self.policy.score(query, text);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((url, score)),
            }
        }

        match best {
            Some((url, score)) if score > self.policy.threshold() => {
                MatchResult::Matched { url: s!(url), score }
            }
            _ => MatchResult::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(text: &str, url: &str) -> Candidate {
        Candidate::new(text, url)
    }

    #[test]
    fn empty_input_is_no_match() {
        let none: [Candidate; 0] = [];
        assert_eq!(LinkMatcher::composite().resolve("anything", &none), MatchResult::NoMatch);
        assert_eq!(LinkMatcher::simple().resolve("anything", &none), MatchResult::NoMatch);
    }

    #[test]
    fn world_war_two_scenario() {
        let cands = [c("جنگ جهانی دوم", "U1"), c("جنگ", "U2")];
        let got = LinkMatcher::composite().resolve("جنگ جهانی دوم", &cands);
        assert_eq!(got, MatchResult::Matched { url: s!("U1"), score: 1.0 });
    }

    #[test]
    fn identity_match_scores_one() {
        let cands = [c("انقلاب مشروطه", "A"), c("مشروطه", "B"), c("انقلاب ایران", "C")];
        let got = LinkMatcher::composite().resolve("انقلاب مشروطه", &cands);
        assert_eq!(got, MatchResult::Matched { url: s!("A"), score: 1.0 });
    }

    #[test]
    fn single_word_exact_match_is_lifted_by_conjunction() {
        use crate::config::consts::{CONJUNCTION_SCORE, SINGLE_WORD_WEIGHT};
        use similarity::ratio;

        // weighted similarity alone is exactly 0.5, which the strict threshold rejects
        let weighted = ratio("تهران", "تهران") * SINGLE_WORD_WEIGHT;
        assert_eq!(weighted, 0.5);
        assert!(weighted <= Policy::Composite.threshold());

        // the unsplit query is its own conjunction part, with full word overlap
        assert_eq!(Policy::Composite.score("تهران", "تهران"), CONJUNCTION_SCORE);
        let cands = [c("تهران", "T")];
        assert_eq!(
            LinkMatcher::composite().resolve("تهران", &cands),
            MatchResult::Matched { url: s!("T"), score: 0.9 }
        );
    }

    #[test]
    fn simple_threshold_is_strict() {
        // ratio("abcd", "abcdxy") == 0.8 exactly
        let at = [c("abcdxy", "X")];
        assert_eq!(LinkMatcher::simple().resolve("abcd", &at), MatchResult::NoMatch);

        // 2 * 9 / 20 = 0.9
        let above = [c("abcdefghixy", "Y")];
        let got = LinkMatcher::simple().resolve("abcdefghi", &above);
        assert_eq!(got.url(), Some("Y"));
    }

    #[test]
    fn composite_threshold_is_strict() {
        // "ab " shared: 2 * 3 / (8 + 4) = 0.5, no containment, overlap only 0.5
        assert_eq!(Policy::Composite.score("ab qrstu", "ab x"), 0.5);
        let at = [c("ab x", "X")];
        assert_eq!(LinkMatcher::composite().resolve("ab qrstu", &at), MatchResult::NoMatch);

        // 2 * 3 / (7 + 4) = 0.545..
        let got = LinkMatcher::composite().resolve("ab qrst", &at);
        assert_eq!(got.url(), Some("X"));
        assert!((got_score(&got) - 6.0 / 11.0).abs() < 1e-12);
    }

    fn got_score(r: &MatchResult) -> f64 {
        match r {
            MatchResult::Matched { score, .. } => *score,
            MatchResult::NoMatch => 0.0,
        }
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let cands = vec![
            RawCandidate { anchor_text: Some(s!("علی")), url: None },
            RawCandidate { anchor_text: None, url: Some(s!("X")) },
            RawCandidate { anchor_text: Some(s!("محمد مصدق")), url: Some(s!("M")) },
            RawCandidate { anchor_text: Some(s!("محمد")), url: Some(s!("")) },
        ];
        let got = LinkMatcher::simple().resolve("محمد مصدق", &cands);
        assert_eq!(got, MatchResult::Matched { url: s!("M"), score: 1.0 });
    }

    #[test]
    fn all_malformed_is_no_match() {
        let cands = vec![RawCandidate::default(), RawCandidate { anchor_text: None, url: Some(s!("U")) }];
        assert_eq!(LinkMatcher::composite().resolve("جنگ جهانی دوم", &cands), MatchResult::NoMatch);
    }

    #[test]
    fn first_candidate_wins_ties() {
        let cands = [c("جنگ جهانی دوم", "first"), c("جنگ جهانی دوم", "second")];
        let got = LinkMatcher::composite().resolve("جنگ جهانی دوم", &cands);
        assert_eq!(got.url(), Some("first"));
    }

    #[test]
    fn duplicates_do_not_raise_score() {
        let once = [c("سازمان ملل", "UN")];
        let many = [c("سازمان ملل", "UN"), c("سازمان ملل", "UN"), c("سازمان ملل", "UN")];
        let q = "تأسیس سازمان ملل متحد";
        assert_eq!(LinkMatcher::composite().resolve(q, &once), LinkMatcher::composite().resolve(q, &many));
    }

    #[test]
    fn deterministic_for_fixed_order() {
        let cands = [c("نفت ایران", "A"), c("ملی شدن صنعت نفت", "B"), c("نفت", "C")];
        let q = "ملی شدن صنعت نفت ایران";
        let m = LinkMatcher::composite();
        let first = m.resolve(q, &cands);
        for _ in 0..10 {
            assert_eq!(m.resolve(q, &cands), first);
        }
    }

    #[test]
    fn raw_candidates_deserialize_with_missing_fields() {
        let raw: Vec<RawCandidate> =
            serde_json::from_str(r#"[{"text":"a b","url":"U"},{"text":"c"},{}]"#).unwrap();
        assert_eq!(raw.len(), 3);
        assert!(raw[0].parts().is_some());
        assert!(raw[1].parts().is_none());
        assert!(raw[2].parts().is_none());
    }
}
