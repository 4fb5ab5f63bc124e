// src/link.rs

// Scrape stage: fetch pages, extract records, resolve each record's canonical link.

use crate::{
    config::consts::{REQUEST_PAUSE_MS, WORKERS},
    core::{html, net::{FetchError, PageFetcher}},
    extract::{PageExtract, PageSpec},
    matcher::LinkMatcher,
    pool::run_pool,
    progress::Progress,
    records::{DeathRecord, EventRecord, Record},
};

/// Resolve `link` for every record from its own candidates. Returns how many matched.
pub fn resolve_links<R: Record>(records: &mut [R]) -> usize {
    let matcher = LinkMatcher::new(R::POLICY);
    let mut matched = 0;
    for r in records.iter_mut() {
        let link = matcher.resolve(r.query(), r.links()).into_url();
        if link.is_some() {
            matched += 1;
        }
        r.set_link(link);
    }
    matched
}

/// Fetch one page and turn it into linked records.
pub fn scrape_page(spec: &PageSpec, fetcher: &dyn PageFetcher) -> Result<PageExtract, FetchError> {
    let url = spec.url();
    let doc = fetcher.fetch(&url)?;

    let text = html::page_text(&doc);
    let candidates = html::harvest_anchors(&doc);
    let mut extract = spec.extract(&text, &candidates);

    let ev = resolve_links(&mut extract.events);
    let de = resolve_links(&mut extract.deaths);
    logd!(
        "{url}: {} candidates, events {ev}/{}, deaths {de}/{} linked",
        candidates.len(), extract.events.len(), extract.deaths.len()
    );
    Ok(extract)
}

#[derive(Debug, Default)]
pub struct ScrapeOutput {
    pub events: Vec<EventRecord>,
    pub deaths: Vec<DeathRecord>,
    pub failed: Vec<PageSpec>,
}

/// Scrape every page in `pages` on a bounded worker pool. Output keeps the order of
/// `pages`, whatever order the fetches finish in. Failed pages are logged and skipped.
pub fn scrape_pages(
    pages: &[PageSpec],
    fetcher: &dyn PageFetcher,
    mut progress: Option<&mut dyn Progress>,
) -> ScrapeOutput {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(pages.len());
    }

    let results = run_pool(
        pages,
        WORKERS,
        REQUEST_PAUSE_MS,
        |spec| scrape_page(spec, fetcher).map_err(|e| e.to_string()),
        |i, result| {
            let label = pages[i].url();
            match result {
                Ok(_) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(&label);
                    }
                }
                Err(msg) => {
                    loge!("{label}: {msg}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(&label, msg);
                    }
                }
            }
        },
    );

    let mut out = ScrapeOutput::default();
    for (spec, result) in pages.iter().zip(results) {
        match result {
            Ok(mut extract) => {
                out.events.append(&mut extract.events);
                out.deaths.append(&mut extract.deaths);
            }
            Err(_) => out.failed.push(*spec),
        }
    }

    logf!(
        "scraped {} pages ({} failed): {} events, {} deaths",
        pages.len(), out.failed.len(), out.events.len(), out.deaths.len()
    );
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    out
}
