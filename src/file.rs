// src/file.rs

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use crate::config::consts::CSV_SEP;
use crate::csv::{parse_rows, to_csv_string};
use crate::matcher::RawCandidate;
use crate::records::Record;

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn normalize_path(p: &str) -> PathBuf {
    PathBuf::from(normalize_separators(p))
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Create the directory that will hold `path`, if it has one.
pub fn ensure_parent(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/* ---------------- Records ---------------- */

/// Write `records` as CSV with the record type's fixed header row. Overwrites `path`.
pub fn write_records<R: Record>(path: &Path, records: &[R]) -> Result<(), Box<dyn Error>> {
    ensure_parent(path)?;
    let rows: Vec<Vec<String>> = records.iter().map(|r| r.to_row()).collect();
    fs::write(path, to_csv_string(R::HEADERS, &rows, CSV_SEP))?;
    logf!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}

/// Read a CSV written by `write_records`. The header row must match exactly.
pub fn read_records<R: Record>(path: &Path) -> Result<Vec<R>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {e}", path.display()))?;
    let text = text.trim_start_matches('\u{feff}');
    let mut rows = parse_rows(text, CSV_SEP).into_iter();

    let header = rows.next().ok_or_else(|| format!("{}: empty file", path.display()))?;
    if header.iter().map(|h| h.trim()).ne(R::HEADERS.iter().copied()) {
        return Err(format!(
            "{}: unexpected header {:?}, want {:?}",
            path.display(), header, R::HEADERS
        ).into());
    }

    let mut out = Vec::new();
    for (i, row) in rows.enumerate() {
        let rec = R::from_row(&row).map_err(|e| format!("{} row {}: {e}", path.display(), i + 2))?;
        out.push(rec);
    }
    logd!("read {} rows from {}", out.len(), path.display());
    Ok(out)
}

/// JSON array of `{"text": .., "url": ..}` objects. Missing fields are kept as malformed.
pub fn read_candidates(path: &Path) -> Result<Vec<RawCandidate>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {e}", path.display()))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{DeathRecord, EventRecord};

    fn tmp(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fa_timeline_{}_{name}", std::process::id()))
    }

    #[test]
    fn records_round_trip_through_disk() {
        let path = tmp("events.csv");
        let events = vec![
            EventRecord {
                year: 1357,
                month: Some(11),
                day: 22,
                title: s!("پیروزی انقلاب، پایان سلطنت"),
                links: vec![RawCandidate::from(crate::matcher::Candidate::new("انقلاب", "https://x/1"))],
                link: Some(s!("https://x/1")),
            },
            EventRecord { year: 1300, title: s!("بی‌تاریخ"), ..Default::default() },
        ];
        write_records(&path, &events).unwrap();
        let back: Vec<EventRecord> = read_records(&path).unwrap();
        assert_eq!(back, events);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn wrong_header_is_rejected() {
        let path = tmp("deaths_bad.csv");
        fs::write(&path, "a,b,c\n1,2,3\n").unwrap();
        let err = read_records::<DeathRecord>(&path).unwrap_err();
        assert!(err.to_string().contains("unexpected header"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn candidates_file_keeps_malformed_entries() {
        let path = tmp("cands.json");
        fs::write(&path, r#"[{"text":"الف","url":"u1"},{"url":"u2"},{}]"#).unwrap();
        let c = read_candidates(&path).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c[1].anchor_text, None);
        let _ = fs::remove_file(&path);
    }
}
