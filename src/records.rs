// src/records.rs

// Row types for the two extracts and their fixed CSV layout.

use std::error::Error;

use crate::matcher::{Policy, RawCandidate};
use crate::core::sanitize::{parse_digits, readable_wiki_url};

/// (year, month, day) in the Solar Hijri calendar. Day 0 = unknown.
pub type DateKey = (i32, Option<u32>, u32);

/// Shared surface of event and death rows, used by the link, merge and file stages.
pub trait Record: Sized + Send {
    const HEADERS: &'static [&'static str];
    /// Policy used to resolve `link` from `links`.
    const POLICY: Policy;

    /// Text the link is resolved against (event title / person name).
    fn query(&self) -> &str;
    fn links(&self) -> &[RawCandidate];
    fn set_link(&mut self, link: Option<String>);
    fn date_key(&self) -> DateKey;

    fn to_row(&self) -> Vec<String>;
    fn from_row(row: &[String]) -> Result<Self, Box<dyn Error>>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub year: i32,
    pub month: Option<u32>,
    pub day: u32,
    pub title: String,
    pub links: Vec<RawCandidate>,
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeathRecord {
    pub year: i32,
    pub month: Option<u32>,
    pub day: u32,
    pub person: String,
    pub details: String,
    pub links: Vec<RawCandidate>,
    pub link: Option<String>,
}

/* ---------------- Cell helpers ---------------- */

fn cell<'a>(row: &'a [String], i: usize, name: &str) -> Result<&'a str, Box<dyn Error>> {
    row.get(i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("missing column {name} (index {i})").into())
}

fn year_digits(s: &str) -> Option<i32> {
    i32::try_from(parse_digits(s)?).ok()
}

fn parse_year(s: &str) -> Result<i32, Box<dyn Error>> {
    let t = s.trim();
    match t.strip_prefix('-') {
        Some(rest) => Ok(-year_digits(rest).ok_or_else(|| format!("bad year: {s}"))?),
        None => Ok(year_digits(t).ok_or_else(|| format!("bad year: {s}"))?),
    }
}

fn parse_month(s: &str) -> Result<Option<u32>, Box<dyn Error>> {
    if s.trim().is_empty() {
        return Ok(None);
    }
    parse_digits(s).map(Some).ok_or_else(|| format!("bad month: {s}").into())
}

fn parse_day(s: &str) -> Result<u32, Box<dyn Error>> {
    if s.trim().is_empty() {
        return Ok(0);
    }
    parse_digits(s).ok_or_else(|| format!("bad day: {s}").into())
}

/// Links cell: JSON list of `{"text","url"}`. Blank cell = no links.
fn parse_links(s: &str) -> Result<Vec<RawCandidate>, Box<dyn Error>> {
    if s.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(s)?)
}

fn links_cell(links: &[RawCandidate]) -> String {
    serde_json::to_string(links).unwrap_or_else(|_| s!("[]"))
}

fn opt_cell(v: Option<&str>) -> String {
    v.map(String::from).unwrap_or_default()
}

fn opt_link(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| readable_wiki_url(t))
}

/* ---------------- Events ---------------- */

impl Record for EventRecord {
    const HEADERS: &'static [&'static str] = &["year", "month", "day", "title", "links", "link"];
    const POLICY: Policy = Policy::Composite;

    fn query(&self) -> &str { &self.title }
    fn links(&self) -> &[RawCandidate] { &self.links }
    fn set_link(&mut self, link: Option<String>) { self.link = link; }
    fn date_key(&self) -> DateKey { (self.year, self.month, self.day) }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.month.map(|m| m.to_string()).unwrap_or_default(),
            self.day.to_string(),
            self.title.clone(),
            links_cell(&self.links),
            opt_cell(self.link.as_deref()),
        ]
    }

    fn from_row(row: &[String]) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            year: parse_year(cell(row, 0, "year")?)?,
            month: parse_month(cell(row, 1, "month")?)?,
            day: parse_day(cell(row, 2, "day")?)?,
            title: s!(cell(row, 3, "title")?),
            links: parse_links(row.get(4).map(|s| s.as_str()).unwrap_or(""))?,
            link: row.get(5).and_then(|s| opt_link(s)),
        })
    }
}

/* ---------------- Deaths ---------------- */

impl Record for DeathRecord {
    const HEADERS: &'static [&'static str] =
        &["year", "month", "day", "person", "details", "links", "link"];
    const POLICY: Policy = Policy::Simple;

    fn query(&self) -> &str { &self.person }
    fn links(&self) -> &[RawCandidate] { &self.links }
    fn set_link(&mut self, link: Option<String>) { self.link = link; }
    fn date_key(&self) -> DateKey { (self.year, self.month, self.day) }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.month.map(|m| m.to_string()).unwrap_or_default(),
            self.day.to_string(),
            self.person.clone(),
            self.details.clone(),
            links_cell(&self.links),
            opt_cell(self.link.as_deref()),
        ]
    }

    fn from_row(row: &[String]) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            year: parse_year(cell(row, 0, "year")?)?,
            month: parse_month(cell(row, 1, "month")?)?,
            day: parse_day(cell(row, 2, "day")?)?,
            person: s!(cell(row, 3, "person")?),
            details: s!(cell(row, 4, "details")?),
            links: parse_links(row.get(5).map(|s| s.as_str()).unwrap_or(""))?,
            link: row.get(6).and_then(|s| opt_link(s)),
        })
    }
}
