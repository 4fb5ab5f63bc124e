// src/core/net.rs

// Page fetching. Stages take a `&dyn PageFetcher` so tests and offline runs can swap it out.

use std::time::Duration;

use crate::config::consts::{
    CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, USER_AGENT, WIKI_BASE, WIKI_PREFIX, YEAR_PAGE_SUFFIX,
};
use super::sanitize::to_persian_digits;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("page not found: {0}")]
    NotFound(String),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("transport error for {url}: {msg}")]
    Transport { url: String, msg: String },
    #[error("reading body: {0}")]
    Io(#[from] std::io::Error),
}

pub trait PageFetcher: Send + Sync {
    /// Full HTML of the page at `url`.
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking HTTPS fetcher. One agent, shared by all workers.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout_read(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self.agent.get(url).call() {
            Ok(resp) => Ok(resp.into_string()?),
            Err(ureq::Error::Status(404, _)) => Err(FetchError::NotFound(s!(url))),
            Err(ureq::Error::Status(status, _)) => Err(FetchError::Status { status, url: s!(url) }),
            Err(ureq::Error::Transport(t)) => Err(FetchError::Transport { url: s!(url), msg: t.to_string() }),
        }
    }
}

/// `https://fa.wikipedia.org/wiki/۱۳۵۷_(خورشیدی)`
pub fn year_page_url(year: i32) -> String {
    join!(WIKI_BASE, WIKI_PREFIX, &to_persian_digits(year as i64), YEAR_PAGE_SUFFIX)
}

/// `https://fa.wikipedia.org/wiki/۲۲_بهمن`
pub fn day_page_url(day: u32, month_name: &str) -> String {
    join!(WIKI_BASE, WIKI_PREFIX, &to_persian_digits(day as i64), "_", month_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_urls_use_persian_digits() {
        assert_eq!(year_page_url(1357), "https://fa.wikipedia.org/wiki/۱۳۵۷_(خورشیدی)");
    }

    #[test]
    fn not_found_reads_well() {
        let e = FetchError::NotFound(s!("https://x/wiki/A"));
        assert_eq!(e.to_string(), "page not found: https://x/wiki/A");
    }
}
