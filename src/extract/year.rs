// src/extract/year.rs

// Year pages: events under month sub-headings ("۱۲ – ..."), deaths as "۱۲ فروردین – name، bio".

use super::{DASHES, links_in, month_number, parse_day_month, split_person};
use crate::core::sanitize::parse_digits;
use crate::matcher::RawCandidate;
use crate::records::{DeathRecord, EventRecord};

pub fn parse_year_events(section: &str, year: i32, candidates: &[RawCandidate]) -> Vec<EventRecord> {
    let mut out = Vec::new();
    let mut month: Option<u32> = None;

    for line in section.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(m) = month_number(line) {
            month = Some(m);
            continue;
        }

        let (day, line_month, title) = match line.split_once(DASHES) {
            Some((left, right)) => match parse_day_month(left) {
                (Some(day), m) => (day, m, right.trim()),
                (None, _) => (0, None, line),
            },
            // bare line only counts once a month heading has been seen
            None if month.is_some() => (0, None, line),
            None => continue,
        };
        if title.is_empty() {
            continue;
        }

        out.push(EventRecord {
            year,
            month: line_month.or(month),
            day,
            title: s!(title),
            links: links_in(title, candidates),
            link: None,
        });
    }

    propagate_day_headers(&mut out);
    out
}

/// A bare "۱۲ فروردین" row heads the undated items below it. Its day is handed down
/// to following day-0 events until the next dated event, then the header is dropped.
fn propagate_day_headers(events: &mut Vec<EventRecord>) {
    let mut carry: Option<u32> = None;
    let mut headers = Vec::new();

    for (i, ev) in events.iter_mut().enumerate() {
        if ev.day == 0 {
            if let Some(d) = day_header(&ev.title) {
                carry = Some(d);
                headers.push(i);
                continue;
            }
            if let Some(d) = carry {
                ev.day = d;
            }
        } else {
            carry = None;
        }
    }

    for i in headers.into_iter().rev() {
        events.remove(i);
    }
}

/// "<digits> <one Persian word>"
fn day_header(title: &str) -> Option<u32> {
    let tokens: Vec<&str> = title.split_whitespace().collect();
    match tokens.as_slice() {
        [d, w] if w.chars().all(|c| ('\u{0622}'..='\u{06CC}').contains(&c)) => parse_digits(d),
        _ => None,
    }
}

pub fn parse_year_deaths(section: &str, year: i32, candidates: &[RawCandidate]) -> Vec<DeathRecord> {
    let mut out = Vec::new();

    for line in section.lines() {
        let Some((left, right)) = line.split_once(DASHES) else { continue };
        let tokens: Vec<&str> = left.split_whitespace().collect();
        let [d, m] = tokens.as_slice() else { continue };
        let Some(day) = parse_digits(d) else { continue };

        let (person, details) = split_person(right);
        if person.is_empty() {
            continue;
        }
        out.push(DeathRecord {
            year,
            month: month_number(m),
            day,
            links: links_in(&person, candidates),
            person,
            details,
            link: None,
        });
    }
    out
}
