// src/export.rs

// Consolidated JSON dataset for the web front end.

use std::{
    collections::HashMap,
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use crate::{
    calendar::jalali_to_gregorian,
    classify::categorize,
    config::consts::{REQUEST_PAUSE_MS, WORKERS},
    core::{html, net::PageFetcher},
    file::ensure_parent,
    pool::run_pool,
    records::{DeathRecord, EventRecord},
    translate::{self, Translator},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineEntry {
    /// Gregorian `YYYY-MM-DD`; empty when the Jalali date is invalid.
    pub date: String,
    /// Jalali `YYYY-MM-DD`, `00` for unknown month/day.
    pub jalali_date: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub labels: Vec<&'static str>,
    pub link: String,
    /// Words in the linked article; 0 without a link or when not sized.
    pub word_count: u64,
    /// `word_count` minus the mean over all entries.
    pub importance_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_english: Option<String>,
}

/// Optional services for the export stage. With neither set, export is fully offline.
#[derive(Clone, Copy, Default)]
pub struct ExportServices<'a> {
    pub translator: Option<&'a dyn Translator>,
    /// Used to size linked articles for `importance_score`.
    pub fetcher: Option<&'a dyn PageFetcher>,
}

type SortKey = (i32, u32, u32);

fn dates(year: i32, month: Option<u32>, day: u32) -> (String, String) {
    let greg = jalali_to_gregorian(year, month.unwrap_or(1), day)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let jalali = format!("{:04}-{:02}-{:02}", year, month.unwrap_or(0), day);
    (greg, jalali)
}

fn event_entry(e: &EventRecord) -> (SortKey, TimelineEntry) {
    let (date, jalali_date) = dates(e.year, e.month, e.day);
    let labels: Vec<&'static str> = categorize(&e.title).iter().map(|c| c.label()).collect();
    let category = s!(labels.first().copied().unwrap_or("Other"));
    let entry = TimelineEntry {
        date,
        jalali_date,
        title: e.title.clone(),
        description: s!(),
        category,
        labels,
        link: e.link.clone().unwrap_or_default(),
        word_count: 0,
        importance_score: 0.0,
        title_english: None,
    };
    ((e.year, e.month.unwrap_or(0), e.day), entry)
}

fn death_entry(d: &DeathRecord) -> (SortKey, TimelineEntry) {
    let (date, jalali_date) = dates(d.year, d.month, d.day);
    let entry = TimelineEntry {
        date,
        jalali_date,
        title: d.person.clone(),
        description: d.details.clone(),
        category: s!("Death"),
        labels: vec!["Death"],
        link: d.link.clone().unwrap_or_default(),
        word_count: 0,
        importance_score: 0.0,
        title_english: None,
    };
    ((d.year, d.month.unwrap_or(0), d.day), entry)
}

/// Word count of every distinct linked article. Unreachable pages count 0.
pub fn linked_word_counts(links: &[String], fetcher: &dyn PageFetcher) -> HashMap<String, u64> {
    let results = run_pool(
        links,
        WORKERS,
        REQUEST_PAUSE_MS,
        |url| {
            let doc = fetcher.fetch(url).map_err(|e| e.to_string())?;
            Ok(html::page_text(&doc).split_whitespace().count() as u64)
        },
        |_, r| {
            if let Err(msg) = r {
                logd!("importance: {msg}");
            }
        },
    );
    links
        .iter()
        .cloned()
        .zip(results.into_iter().map(|r| r.unwrap_or(0)))
        .collect()
}

/// Importance is the deviation of an entry's word count from the mean over all entries.
pub fn score_importance(entries: &mut [TimelineEntry]) {
    if entries.is_empty() {
        return;
    }
    let mean = entries.iter().map(|e| e.word_count as f64).sum::<f64>() / entries.len() as f64;
    for e in entries.iter_mut() {
        e.importance_score = e.word_count as f64 - mean;
    }
}

/// Events and deaths as one list ordered by Jalali date (events first on equal dates).
pub fn build_timeline(
    events: &[EventRecord],
    deaths: &[DeathRecord],
    services: ExportServices<'_>,
) -> Vec<TimelineEntry> {
    let mut keyed: Vec<(SortKey, TimelineEntry)> = events.iter().map(event_entry).collect();
    keyed.extend(deaths.iter().map(death_entry));
    keyed.sort_by_key(|(k, _)| *k);
    let mut entries: Vec<TimelineEntry> = keyed.into_iter().map(|(_, e)| e).collect();

    if let Some(fetcher) = services.fetcher {
        let mut links: Vec<String> = entries
            .iter()
            .filter(|e| !e.link.is_empty())
            .map(|e| e.link.clone())
            .collect();
        links.sort_unstable();
        links.dedup();
        logf!("sizing {} linked articles", links.len());

        let counts = linked_word_counts(&links, fetcher);
        for e in entries.iter_mut() {
            e.word_count = counts.get(&e.link).copied().unwrap_or(0);
        }
        score_importance(&mut entries);
    }

    if let Some(translator) = services.translator {
        logf!("translating {} titles", entries.len());
        let titles: Vec<String> = entries.iter().map(|e| e.title.clone()).collect();
        let translated = run_pool(
            &titles,
            WORKERS,
            0,
            |t| Ok::<String, String>(translate::to_english(translator, t)),
            |_, _| {},
        );
        for (e, t) in entries.iter_mut().zip(translated) {
            e.title_english = t.ok();
        }
    }

    entries
}

pub fn write_timeline(path: &Path, entries: &[TimelineEntry]) -> Result<(), Box<dyn Error>> {
    ensure_parent(path)?;
    let mut w = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut w, entries)?;
    w.flush()?;
    logf!("wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}
