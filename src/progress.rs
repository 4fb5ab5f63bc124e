// src/progress.rs
/// Status sink for the page scrape. The CLI prints to stderr; library callers may pass `None`.
pub trait Progress {
    /// Number of pages about to be fetched.
    fn begin(&mut self, _total: usize) {}

    fn log(&mut self, _msg: &str) {}

    /// One page fetched and parsed. `label` is its URL.
    fn item_done(&mut self, _label: &str) {}

    /// One page failed; the scrape carries on without it.
    fn item_failed(&mut self, _label: &str, _err: &str) {}

    fn finish(&mut self) {}
}
