// src/merge.rs

// Reconcile the calendar-page extract with the year-page extract.

use std::collections::HashMap;

use crate::config::consts::DUPLICATE_SIMILARITY;
use crate::core::sanitize::first_two_words;
use crate::matcher::similarity::ratio;
use crate::records::{DateKey, Record};

/// Two titles on the same date describe the same thing.
pub fn same_entry(a: &str, b: &str) -> bool {
    let (fa, fb) = (first_two_words(a), first_two_words(b));
    (!fa.is_empty() && fa == fb) || ratio(a, b) > DUPLICATE_SIMILARITY
}

#[derive(Debug)]
pub struct MergeOutput<R> {
    pub records: Vec<R>,
    pub dropped: usize,
}

/// Calendar-side records that duplicate a year-side record on the same date are dropped.
/// Output: surviving calendar records, then every year record.
pub fn merge<R: Record>(calendar: Vec<R>, year: Vec<R>) -> MergeOutput<R> {
    let mut by_date: HashMap<DateKey, Vec<&str>> = HashMap::new();
    for r in &year {
        by_date.entry(r.date_key()).or_default().push(r.query());
    }

    let before = calendar.len();
    let kept: Vec<R> = calendar
        .into_iter()
        .filter(|c| {
            by_date
                .get(&c.date_key())
                .is_none_or(|titles| !titles.iter().any(|t| same_entry(c.query(), t)))
        })
        .collect();
    let dropped = before - kept.len();

    let mut records = kept;
    records.extend(year);

    logf!("merge: {dropped} duplicates dropped, {} records kept", records.len());
    MergeOutput { records, dropped }
}
