// src/config/consts.rs

// Net config
pub const WIKI_BASE: &str = "https://fa.wikipedia.org";
pub const WIKI_PREFIX: &str = "/wiki/";
pub const YEAR_PAGE_SUFFIX: &str = "_(خورشیدی)";
pub const USER_AGENT: &str = "fa_timeline/0.3 (Iranian timeline dataset)";
pub const CONNECT_TIMEOUT_SECS: u64 = 5;
pub const READ_TIMEOUT_SECS: u64 = 15;

pub const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const TRANSLATION_ERROR: &str = "<Translation Error>";

// Year range (Solar Hijri)
pub const FIRST_YEAR: i32 = 1300;
pub const LAST_YEAR: i32 = 1403;

// Matching
pub const SIMPLE_THRESHOLD: f64 = 0.8;
pub const COMPOSITE_THRESHOLD: f64 = 0.5;
pub const SINGLE_WORD_WEIGHT: f64 = 0.5;
pub const PART_SIMILARITY_MIN: f64 = 0.8;
pub const WORD_OVERLAP_MIN: f64 = 0.5;
pub const CONJUNCTION_SCORE: f64 = 0.9;
pub const CONJUNCTION: &str = " و ";

// Merge
pub const DUPLICATE_SIMILARITY: f64 = 0.8;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const EVENTS_FILE: &str = "events.csv";
pub const DEATHS_FILE: &str = "deaths.csv";
pub const TIMELINE_FILE: &str = "timeline.json";
pub const CSV_SEP: char = ',';

// Concurrency
pub const WORKERS: usize = 10;
pub const REQUEST_PAUSE_MS: u64 = 100; // be polite
pub const JITTER_MS: u64 = 50; // extra 0..50 ms
