// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod matcher;

pub mod calendar;
pub mod classify;
pub mod csv;
pub mod export;
pub mod extract;
pub mod file;
pub mod link;
pub mod merge;
pub mod pool;
pub mod progress;
pub mod records;
pub mod translate;

pub use matcher::{Candidate, LinkMatcher, MatchResult, Policy, RawCandidate};
