// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::matcher::Policy;

#[derive(Clone, Debug, PartialEq)]
pub struct AppOptions {
    pub command: Command,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            command: Command::Help,
            log_file: None,
            verbose: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Scrape(ScrapeOptions),
    Merge(MergeOptions),
    Export(ExportOptions),
    Match(MatchOptions),
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Events,
    Deaths,
}

impl RecordKind {
    pub fn file_name(&self) -> &'static str {
        match self { RecordKind::Events => EVENTS_FILE, RecordKind::Deaths => DEATHS_FILE }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub from_year: i32,
    pub to_year: i32,
    pub out_dir: PathBuf,
    /// Scrape the 366 calendar-day pages instead of year pages.
    pub calendar: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            from_year: FIRST_YEAR,
            to_year: LAST_YEAR,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            calendar: false,
        }
    }
}

impl ScrapeOptions {
    pub fn years(&self) -> Vec<i32> {
        (self.from_year..=self.to_year).collect()
    }

    pub fn events_path(&self) -> PathBuf {
        self.out_dir.join(EVENTS_FILE)
    }

    pub fn deaths_path(&self) -> PathBuf {
        self.out_dir.join(DEATHS_FILE)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOptions {
    pub kind: RecordKind,
    pub calendar: PathBuf,
    pub year: PathBuf,
    /// Defaults to `out/<kind>.csv`.
    pub out: Option<PathBuf>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            kind: RecordKind::Events,
            calendar: PathBuf::new(),
            year: PathBuf::new(),
            out: None,
        }
    }
}

impl MergeOptions {
    pub fn out_path(&self) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR).join(self.kind.file_name()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub events: PathBuf,
    pub deaths: PathBuf,
    pub out: PathBuf,
    pub translate: bool,
    /// Fetch linked articles to fill `importance_score`.
    pub importance: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        let dir = PathBuf::from(DEFAULT_OUT_DIR);
        Self {
            events: dir.join(EVENTS_FILE),
            deaths: dir.join(DEATHS_FILE),
            out: dir.join(TIMELINE_FILE),
            translate: false,
            importance: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatchOptions {
    pub query: String,
    pub candidates: PathBuf,
    pub policy: Policy,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            query: s!(),
            candidates: PathBuf::new(),
            policy: Policy::Composite,
        }
    }
}
