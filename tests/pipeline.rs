// tests/pipeline.rs
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use fa_timeline::core::net::{FetchError, PageFetcher, year_page_url};
use fa_timeline::export::{self, ExportServices};
use fa_timeline::extract::PageSpec;
use fa_timeline::file::{read_records, write_records};
use fa_timeline::link::scrape_pages;
use fa_timeline::merge::merge;
use fa_timeline::records::{DeathRecord, EventRecord};

const YEAR_1357: &str = r#"<html><body><div id="mw-content-text" class="mw-body-content">
<p>سال <b>۱۳۵۷</b> خورشیدی</p>
<div class="mw-heading"><h2 id="r">رویدادها</h2><span class="mw-editsection">[<a href="/w/index.php?action=edit">ویرایش</a>]</span></div>
<h3>بهمن</h3>
<ul>
<li>۲۲ – پیروزی <a href="/wiki/%D8%A7%D9%86%D9%82%D9%84%D8%A7%D8%A8_%D8%A7%DB%8C%D8%B1%D8%A7%D9%86">انقلاب ایران</a><sup>[۱]</sup></li>
<li>۱۲ – بازگشت <a href="/wiki/Khomeini" title="روح‌الله خمینی">روح‌الله خمینی</a> به ایران</li>
</ul>
<div class="mw-heading"><h2 id="z">زادروزها</h2></div>
<ul><li>۱ فروردین – کسی</li></ul>
<div class="mw-heading"><h2 id="d">درگذشت‌ها</h2></div>
<ul>
<li>۱۸ شهریور – <a href="/wiki/Jalal">جلال آل احمد</a>، نویسنده</li>
<li>۵ مهر – ناشناس، <a href="/wiki/X">شاعر</a></li>
</ul>
</div></body></html>"#;

/// Serves canned pages; everything else is a 404.
struct Canned(HashMap<String, String>);

impl PageFetcher for Canned {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.0.get(url).cloned().ok_or_else(|| FetchError::NotFound(url.to_string()))
    }
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("fa_timeline_it_{}_{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn canned() -> Canned {
    let mut pages = HashMap::new();
    pages.insert(year_page_url(1357), YEAR_1357.to_string());
    Canned(pages)
}

#[test]
fn scrape_links_records_and_skips_missing_pages() {
    let pages = [PageSpec::Year(1356), PageSpec::Year(1357)];
    let out = scrape_pages(&pages, &canned(), None);

    assert_eq!(out.failed, vec![PageSpec::Year(1356)]);

    let titles: Vec<&str> = out.events.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["پیروزی انقلاب ایران", "بازگشت روح‌الله خمینی به ایران"]);
    assert!(out.events.iter().all(|e| e.year == 1357 && e.month == Some(11)));
    assert_eq!(
        out.events[0].link.as_deref(),
        Some("https://fa.wikipedia.org/wiki/انقلاب_ایران")
    );
    assert_eq!(out.events[1].link.as_deref(), Some("https://fa.wikipedia.org/wiki/Khomeini"));

    assert_eq!(out.deaths.len(), 2);
    let jalal = &out.deaths[0];
    assert_eq!((jalal.month, jalal.day), (Some(6), 18));
    assert_eq!(jalal.person, "جلال آل احمد");
    assert_eq!(jalal.details, "نویسنده");
    assert_eq!(jalal.link.as_deref(), Some("https://fa.wikipedia.org/wiki/Jalal"));
    // the only anchor sits in the details, not the name
    assert_eq!(out.deaths[1].link, None);
}

#[test]
fn csv_merge_export_end_to_end() {
    let dir = tmp_dir("e2e");
    let out = scrape_pages(&[PageSpec::Year(1357)], &canned(), None);

    let events_csv = dir.join("events.csv");
    let deaths_csv = dir.join("deaths.csv");
    write_records(&events_csv, &out.events).unwrap();
    write_records(&deaths_csv, &out.deaths).unwrap();

    let events: Vec<EventRecord> = read_records(&events_csv).unwrap();
    let deaths: Vec<DeathRecord> = read_records(&deaths_csv).unwrap();
    assert_eq!(events, out.events);
    assert_eq!(deaths, out.deaths);

    // a calendar-page copy of one event plus one the year page lacks
    let calendar = vec![
        EventRecord { year: 1357, month: Some(11), day: 22, title: "پیروزی انقلاب".into(), ..Default::default() },
        EventRecord { year: 1357, month: Some(11), day: 22, title: "تعطیلی مدارس".into(), ..Default::default() },
    ];
    let merged = merge(calendar, events);
    assert_eq!(merged.dropped, 1);
    assert_eq!(merged.records.len(), 3);
    assert_eq!(merged.records[0].title, "تعطیلی مدارس");

    let timeline = export::build_timeline(&merged.records, &deaths, ExportServices::default());
    let json_path = dir.join("timeline.json");
    export::write_timeline(&json_path, &timeline).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 5);

    let dates: Vec<&str> = arr.iter().map(|e| e["date"].as_str().unwrap()).collect();
    assert_eq!(dates, vec!["1978-09-09", "1978-09-27", "1979-02-01", "1979-02-11", "1979-02-11"]);
    assert_eq!(arr[0]["category"], "Death");
    assert_eq!(arr[4]["category"], "Politics");
    assert_eq!(arr[4]["link"], "https://fa.wikipedia.org/wiki/انقلاب_ایران");

    let _ = fs::remove_dir_all(&dir);
}
