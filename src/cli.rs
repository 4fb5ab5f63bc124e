// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use ::log::LevelFilter;

use crate::config::options::{
    AppOptions, Command, ExportOptions, MatchOptions, MergeOptions, RecordKind, ScrapeOptions,
};
use crate::core::net::{HttpFetcher, PageFetcher};
use crate::core::sanitize::parse_digits;
use crate::export::{self, ExportServices};
use crate::extract::{self, PageSpec};
use crate::file::{normalize_path, read_candidates, read_records, write_records};
use crate::link;
use crate::matcher::{LinkMatcher, MatchResult, Policy};
use crate::merge;
use crate::progress::Progress;
use crate::records::{DeathRecord, EventRecord, Record};
use crate::translate::{GtxTranslator, Translator};

const HELP: &str = include_str!("cli_help.txt");

pub fn run() -> Result<(), Box<dyn Error>> {
    let opts = parse_args(env::args().skip(1))?;

    let level = if opts.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    match &opts.log_file {
        Some(path) => crate::log::init_file(path, level)?,
        None => crate::log::init_stderr(level)?,
    }

    execute(opts.command)
}

pub fn execute(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Scrape(o) => scrape(&o),
        Command::Merge(o) => match o.kind {
            RecordKind::Events => merge_files::<EventRecord>(&o),
            RecordKind::Deaths => merge_files::<DeathRecord>(&o),
        },
        Command::Export(o) => export(&o),
        Command::Match(o) => match_one(&o),
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
    }
}

/* ---------------- Commands ---------------- */

fn scrape(o: &ScrapeOptions) -> Result<(), Box<dyn Error>> {
    let pages: Vec<PageSpec> = if o.calendar {
        extract::calendar_days()
    } else {
        o.years().into_iter().map(PageSpec::Year).collect()
    };

    let fetcher = HttpFetcher::new();
    let mut progress = CliProgress::default();
    progress.log(&format!("scraping {} pages", pages.len()));
    let out = link::scrape_pages(&pages, &fetcher, Some(&mut progress));

    write_records(&o.events_path(), &out.events)?;
    write_records(&o.deaths_path(), &out.deaths)?;
    if !out.failed.is_empty() {
        eprintln!("{} pages failed, see log", out.failed.len());
    }
    Ok(())
}

fn merge_files<R: Record>(o: &MergeOptions) -> Result<(), Box<dyn Error>> {
    let calendar: Vec<R> = read_records(&o.calendar)?;
    let year: Vec<R> = read_records(&o.year)?;
    let merged = merge::merge(calendar, year);
    let out = o.out_path();
    write_records(&out, &merged.records)?;
    println!("{} records ({} duplicates dropped) -> {}", merged.records.len(), merged.dropped, out.display());
    Ok(())
}

fn export(o: &ExportOptions) -> Result<(), Box<dyn Error>> {
    let events: Vec<EventRecord> = read_records(&o.events)?;
    let deaths: Vec<DeathRecord> = read_records(&o.deaths)?;

    let http = HttpFetcher::new();
    let gtx = GtxTranslator::new();
    let fetcher: &dyn PageFetcher = &http;
    let translator: &dyn Translator = &gtx;
    let services = ExportServices {
        translator: o.translate.then_some(translator),
        fetcher: o.importance.then_some(fetcher),
    };

    let entries = export::build_timeline(&events, &deaths, services);
    export::write_timeline(&o.out, &entries)?;
    println!("{} entries -> {}", entries.len(), o.out.display());
    Ok(())
}

fn match_one(o: &MatchOptions) -> Result<(), Box<dyn Error>> {
    let candidates = read_candidates(&o.candidates)?;
    match LinkMatcher::new(o.policy).resolve(&o.query, &candidates) {
        MatchResult::Matched { url, score } => println!("{score:.3}\t{url}"),
        MatchResult::NoMatch => println!("no match"),
    }
    Ok(())
}

/* ---------------- Progress ---------------- */

/// One stderr line per finished page.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, label: &str) {
        self.done += 1;
        eprintln!("[{}/{}] {label}", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, label: &str, err: &str) {
        self.failed += 1;
        eprintln!("[{}/{}] FAILED {label}: {err}", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        eprintln!("done: {} ok, {} failed", self.done, self.failed);
    }
}

/* ---------------- Parsing ---------------- */

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, Box<dyn Error>> {
    args.next().ok_or_else(|| format!("Missing value for {flag}").into())
}

fn path_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<PathBuf, Box<dyn Error>> {
    Ok(normalize_path(&value(args, flag)?))
}

fn year_value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<i32, Box<dyn Error>> {
    let v = value(args, flag)?;
    parse_digits(&v)
        .and_then(|y| i32::try_from(y).ok())
        .ok_or_else(|| format!("Bad year for {flag}: {v}").into())
}

/// Parse everything after the program name. `-h` anywhere wins.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<AppOptions, Box<dyn Error>> {
    let mut opts = AppOptions::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--log-file" => opts.log_file = Some(path_value(&mut args, "--log-file")?),
            "-v" | "--verbose" => opts.verbose = true,
            "-h" | "--help" => {
                opts.command = Command::Help;
                return Ok(opts);
            }

            "scrape" => opts.command = Command::Scrape(ScrapeOptions::default()),
            "merge" => opts.command = Command::Merge(MergeOptions::default()),
            "export" => opts.command = Command::Export(ExportOptions::default()),
            "match" => opts.command = Command::Match(MatchOptions::default()),

            flag => match &mut opts.command {
                Command::Scrape(o) => match flag {
                    "--from" => o.from_year = year_value(&mut args, flag)?,
                    "--to" => o.to_year = year_value(&mut args, flag)?,
                    "-o" | "--out" => o.out_dir = path_value(&mut args, flag)?,
                    "--calendar" => o.calendar = true,
                    _ => return Err(format!("Unknown arg for scrape: {flag}").into()),
                },
                Command::Merge(o) => match flag {
                    "--calendar" => o.calendar = path_value(&mut args, flag)?,
                    "--year" => o.year = path_value(&mut args, flag)?,
                    "-o" | "--out" => o.out = Some(path_value(&mut args, flag)?),
                    "--kind" => {
                        let v = value(&mut args, flag)?;
                        o.kind = match v.to_ascii_lowercase().as_str() {
                            "events" => RecordKind::Events,
                            "deaths" => RecordKind::Deaths,
                            other => return Err(format!("Unknown kind: {other}").into()),
                        };}
                    _ => return Err(format!("Unknown arg for merge: {flag}").into()),
                },
                Command::Export(o) => match flag {
                    "--events" => o.events = path_value(&mut args, flag)?,
                    "--deaths" => o.deaths = path_value(&mut args, flag)?,
                    "-o" | "--out" => o.out = path_value(&mut args, flag)?,
                    "--translate" => o.translate = true,
                    "--importance" => o.importance = true,
                    _ => return Err(format!("Unknown arg for export: {flag}").into()),
                },
                Command::Match(o) => match flag {
                    "-q" | "--query" => o.query = value(&mut args, flag)?,
                    "-c" | "--candidates" => o.candidates = path_value(&mut args, flag)?,
                    "--simple" => o.policy = Policy::Simple,
                    _ => return Err(format!("Unknown arg for match: {flag}").into()),
                },
                Command::Help => return Err(format!("Unknown arg: {flag}").into()),
            },
        }
    }

    validate(&opts.command)?;
    Ok(opts)
}

fn validate(command: &Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Scrape(o) if o.from_year > o.to_year => {
            Err(format!("--from {} is after --to {}", o.from_year, o.to_year).into())
        }
        Command::Merge(o) if o.calendar.as_os_str().is_empty() || o.year.as_os_str().is_empty() => {
            Err("merge needs --calendar and --year".into())
        }
        Command::Match(o) if o.query.trim().is_empty() || o.candidates.as_os_str().is_empty() => {
            Err("match needs --query and --candidates".into())
        }
        _ => Ok(()),
    }
}
