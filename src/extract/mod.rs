// src/extract/mod.rs

// Section lookup and line parsing for year pages and calendar-day pages.

mod day;
mod year;

pub use day::{parse_day_deaths, parse_day_events};
pub use year::{parse_year_deaths, parse_year_events};

use crate::core::{first_of, net};
use crate::core::sanitize::parse_digits;
use crate::matcher::RawCandidate;
use crate::records::{DeathRecord, EventRecord};

pub const PERSIAN_MONTHS: [&str; 12] = [
    "فروردین", "اردیبهشت", "خرداد", "تیر", "مرداد", "شهریور",
    "مهر", "آبان", "آذر", "دی", "بهمن", "اسفند",
];

/// Both dash forms seen in list items.
const DASHES: [char; 2] = ['–', '-'];

pub fn month_number(name: &str) -> Option<u32> {
    PERSIAN_MONTHS
        .iter()
        .position(|m| *m == name.trim())
        .map(|i| i as u32 + 1)
}

/// Which kind of page a body of text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PageSpec {
    /// `/wiki/۱۳۵۷_(خورشیدی)`: events grouped by month.
    Year(i32),
    /// `/wiki/۲۲_بهمن`: events listed by year.
    Day { month: u32, day: u32 },
}

impl PageSpec {
    pub fn url(&self) -> String {
        match *self {
            PageSpec::Year(y) => net::year_page_url(y),
            PageSpec::Day { month, day } => {
                let name = PERSIAN_MONTHS.get((month as usize).wrapping_sub(1)).copied().unwrap_or("");
                net::day_page_url(day, name)
            }
        }
    }

    /// Parse events and deaths out of page text, attaching every candidate whose
    /// anchor text occurs in the record's title or name.
    pub fn extract(&self, text: &str, candidates: &[RawCandidate]) -> PageExtract {
        let events_text = events_section(text).unwrap_or("");
        let deaths_text = deaths_section(text).unwrap_or("");

        match *self {
            PageSpec::Year(year) => PageExtract {
                events: parse_year_events(events_text, year, candidates),
                deaths: parse_year_deaths(deaths_text, year, candidates),
            },
            PageSpec::Day { month, day } => PageExtract {
                events: parse_day_events(events_text, month, day, candidates),
                deaths: parse_day_deaths(deaths_text, month, day, candidates),
            },
        }
    }
}

/// All 366 calendar-day pages, Farvardin 1 to Esfand 30.
pub fn calendar_days() -> Vec<PageSpec> {
    let mut out = Vec::with_capacity(366);
    for month in 1..=12u32 {
        let days = if month <= 6 { 31 } else { 30 };
        for day in 1..=days {
            out.push(PageSpec::Day { month, day });
        }
    }
    out
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageExtract {
    pub events: Vec<EventRecord>,
    pub deaths: Vec<DeathRecord>,
}

/* ---------------- Sections ---------------- */

const BIRTHS: &str = "زادروزها";
const DEATHS_ALT: &str = "درگذشتگان";
const PHENOMENA: &str = "پدیده\u{200c}های";

/// Text after a heading line `start` up to the first `end` (or end of text).
fn after_heading<'a>(text: &'a str, start: &str, end: Option<&str>) -> Option<&'a str> {
    let from = if text.starts_with(start) {
        start.len()
    } else {
        text.find(&join!("\n", start))? + 1 + start.len()
    };
    let rest = &text[from..];
    match end {
        Some(e) => rest.find(e).map(|i| &rest[..i]),
        None => Some(rest),
    }
}

fn events_spaced(t: &str) -> Option<&str> { after_heading(t, "رویداد ها\n", Some(BIRTHS)) }
fn events_plain(t: &str) -> Option<&str> { after_heading(t, "رویدادها\n", Some(BIRTHS)) }
fn events_domestic(t: &str) -> Option<&str> { after_heading(t, "رویدادهای داخلی\n", Some(BIRTHS)) }
fn events_until_deaths(t: &str) -> Option<&str> { after_heading(t, "رویدادها\n", Some(DEATHS_ALT)) }
fn events_until_phenomena(t: &str) -> Option<&str> { after_heading(t, "رویدادها\n", Some(PHENOMENA)) }

fn deaths_plain(t: &str) -> Option<&str> { after_heading(t, "درگذشت\u{200c}ها\n", None) }
fn deaths_alt(t: &str) -> Option<&str> { after_heading(t, "درگذشتگان\n", None) }
fn deaths_mortality(t: &str) -> Option<&str> { after_heading(t, "مرگ\u{200c}ها\n", None) }

type SectionStrategy = fn(&str) -> Option<&str>;

const EVENT_SECTIONS: [SectionStrategy; 5] = [
    events_spaced,
    events_plain,
    events_domestic,
    events_until_deaths,
    events_until_phenomena,
];

const DEATH_SECTIONS: [SectionStrategy; 3] = [deaths_plain, deaths_alt, deaths_mortality];

pub fn events_section(text: &str) -> Option<&str> {
    let found = first_of(text, EVENT_SECTIONS);
    if found.is_none() {
        logd!("no events section found");
    }
    found
}

pub fn deaths_section(text: &str) -> Option<&str> {
    let found = first_of(text, DEATH_SECTIONS);
    if found.is_none() {
        logd!("no deaths section found");
    }
    found
}

/* ---------------- Line helpers ---------------- */

/// Candidates whose anchor text occurs in `text`, first occurrence of each pair kept.
/// Entries without anchor text can never occur and are dropped; a missing URL is kept
/// for the matcher to skip.
pub fn links_in(text: &str, candidates: &[RawCandidate]) -> Vec<RawCandidate> {
    let mut out: Vec<RawCandidate> = Vec::new();
    for c in candidates {
        let Some(anchor) = c.anchor_text.as_deref() else { continue };
        if anchor.trim().is_empty() || !text.contains(anchor) {
            continue;
        }
        if !out.contains(c) {
            out.push(c.clone());
        }
    }
    out
}

/// `"۱۲"` → (Some(12), None); `"۱۲ فروردین"` → (Some(12), Some(1)); anything else → (None, None).
fn parse_day_month(left: &str) -> (Option<u32>, Option<u32>) {
    let tokens: Vec<&str> = left.split_whitespace().collect();
    match tokens.as_slice() {
        [d] => (parse_digits(d), None),
        [d, m] => match (parse_digits(d), month_number(m)) {
            (Some(d), Some(m)) => (Some(d), Some(m)),
            _ => (None, None),
        },
        _ => (None, None),
    }
}

/// "person، details" with ':' as the fallback separator.
fn split_person(s: &str) -> (String, String) {
    let s = s.trim();
    match s.split_once('،').or_else(|| s.split_once(':')) {
        Some((p, d)) => (s!(p.trim()), s!(d.trim())),
        None => (s!(s), s!()),
    }
}
