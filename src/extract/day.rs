// src/extract/day.rs

// Calendar-day pages list one line per year: "۱۳۵۷ – ..." under events and deaths alike.

use super::{DASHES, links_in, split_person};
use crate::core::sanitize::parse_digits;
use crate::matcher::RawCandidate;
use crate::records::{DeathRecord, EventRecord};

/// Leading "<year> –" of a line, plus the rest.
fn year_line(line: &str) -> Option<(i32, &str)> {
    let (left, right) = line.split_once(DASHES)?;
    let year = i32::try_from(parse_digits(left)?).ok()?;
    let right = right.trim();
    (!right.is_empty()).then_some((year, right))
}

pub fn parse_day_events(section: &str, month: u32, day: u32, candidates: &[RawCandidate]) -> Vec<EventRecord> {
    section
        .lines()
        .filter_map(|line| year_line(line.trim()))
        .map(|(year, title)| EventRecord {
            year,
            month: Some(month),
            day,
            title: s!(title),
            links: links_in(title, candidates),
            link: None,
        })
        .collect()
}

pub fn parse_day_deaths(section: &str, month: u32, day: u32, candidates: &[RawCandidate]) -> Vec<DeathRecord> {
    let mut out = Vec::new();
    for (year, rest) in section.lines().filter_map(|line| year_line(line.trim())) {
        let (person, details) = split_person(rest);
        if person.is_empty() {
            continue;
        }
        out.push(DeathRecord {
            year,
            month: Some(month),
            day,
            links: links_in(&person, candidates),
            person,
            details,
            link: None,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_keyed_by_leading_year() {
        let section = "۱۳۵۷ – پیروزی انقلاب\nمتن بی‌سال\n1320 - اشغال ایران\nسال – بی‌عدد\n";
        let evs = parse_day_events(section, 11, 22, &[]);
        let got: Vec<(i32, &str)> = evs.iter().map(|e| (e.year, e.title.as_str())).collect();
        assert_eq!(got, vec![(1357, "پیروزی انقلاب"), (1320, "اشغال ایران")]);
        assert!(evs.iter().all(|e| e.month == Some(11) && e.day == 22));
    }

    #[test]
    fn oversized_year_line_is_skipped() {
        let evs = parse_day_events("3000000000 – دور\n۱۳۰۰ – نزدیک\n", 1, 1, &[]);
        assert_eq!(evs.len(), 1);
        assert_eq!(evs[0].year, 1300);
    }

    #[test]
    fn deaths_split_name_and_bio() {
        let cand = RawCandidate { anchor_text: Some(s!("پروین اعتصامی")), url: Some(s!("P")) };
        let ds = parse_day_deaths("۱۳۲۰ – پروین اعتصامی، شاعر\n", 1, 15, &[cand.clone()]);
        assert_eq!(ds.len(), 1);
        assert_eq!(ds[0].person, "پروین اعتصامی");
        assert_eq!(ds[0].details, "شاعر");
        assert_eq!(ds[0].links, vec![cand]);
    }
}
