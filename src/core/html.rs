// src/core/html.rs
use crate::config::consts::{WIKI_BASE, WIKI_PREFIX};
use crate::matcher::RawCandidate;

use super::sanitize::{normalize_entities, normalize_ws, strip_brackets};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}
/// Next `o ... c` block at or after `from`, as byte offsets into `s`.
/// `lc` must be `to_lower(s)`; ASCII-only lowering keeps offsets aligned.
pub fn next_tag_block_ci(s: &str, lc: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Value of `name="..."` (or single-quoted) inside an opening tag.
pub fn attr_value(open_tag: &str, name: &str) -> Option<String> {
    let lc = to_lower(open_tag);
    let pat = join!(" ", &to_lower(name), "=");
    let at = lc.find(&pat)? + pat.len();
    let rest = &open_tag[at..];
    let quote = rest.chars().next()?;
    if quote == '"' || quote == '\'' {
        let body = &rest[1..];
        let end = body.find(quote)?;
        Some(normalize_entities(&body[..end]))
    } else {
        let end = rest.find(|c: char| c.is_whitespace() || c == '>').unwrap_or(rest.len());
        Some(normalize_entities(&rest[..end]))
    }
}

/// Drop every `open..close` block (non-nesting), e.g. `<sup>` citation markers.
pub fn remove_blocks_ci(s: &str, open: &str, close: &str) -> String {
    let lc = to_lower(s);
    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some((b_s, b_e)) = next_tag_block_ci(s, &lc, open, close, pos) {
        out.push_str(&s[pos..b_s]);
        pos = b_e;
    }
    out.push_str(&s[pos..]);
    out
}

// Tags that end a visual line in rendered wiki pages.
const LINE_BREAKS: [&str; 10] = [
    "</li>", "</p>", "</h2>", "</h3>", "</h4>", "</dd>", "</dt>", "</tr>", "</div>", "<br",
];

/// Plain text of an article, one block per line, close to what the wiki text API returns.
pub fn page_text(doc: &str) -> String {
    // Article body only; fall back to the whole document.
    let body = to_lower(doc)
        .find("id=\"mw-content-text\"")
        .and_then(|i| doc[i..].find('>').map(|gt| &doc[i + gt + 1..]))
        .unwrap_or(doc);
    let body = remove_blocks_ci(body, "<style", "</style>");
    let body = remove_blocks_ci(&body, "<script", "</script>");
    let body = remove_blocks_ci(&body, "<sup", "</sup>");

    let lc = to_lower(&body);
    let mut marked = String::with_capacity(body.len() + 256);
    let mut last = 0usize;
    for (i, _) in lc.match_indices('<') {
        if LINE_BREAKS.iter().any(|t| lc[i..].starts_with(t)) {
            marked.push_str(&body[last..i]);
            marked.push('\n');
            last = i;
        }
    }
    marked.push_str(&body[last..]);

    let mut lines: Vec<String> = Vec::new();
    for raw in marked.split('\n') {
        let line = normalize_ws(&normalize_entities(&strip_tags(raw)));
        // edit links and other bracket-only chrome
        if line.is_empty() || strip_brackets(&line).is_empty() {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Every live article link in the document as a candidate (visible text, absolute URL).
/// Red links, namespaced pages and in-page anchors are skipped.
pub fn harvest_anchors(doc: &str) -> Vec<RawCandidate> {
    let lc = to_lower(doc);
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((a_s, a_e)) = next_tag_block_ci(doc, &lc, "<a ", "</a>", pos) {
        pos = a_e;
        let block = &doc[a_s..a_e];
        let open_end = match block.find('>') {
            Some(i) => i + 1,
            None => continue,
        };
        let open_tag = &block[..open_end];

        let Some(href) = attr_value(open_tag, "href") else { continue };
        if !href.starts_with(WIKI_PREFIX) || href.contains("redlink=1") {
            continue;
        }
        let target = href[WIKI_PREFIX.len()..].split('#').next().unwrap_or("");
        let target = super::sanitize::decode_url_part(target);
        if target.is_empty() || target.contains(':') {
            continue;
        }

        let mut text = normalize_ws(&normalize_entities(&strip_tags(inner_after_open_tag(block))));
        if text.is_empty() {
            text = attr_value(open_tag, "title").unwrap_or_default();
        }
        let url = join!(WIKI_BASE, WIKI_PREFIX, &target);
        out.push(RawCandidate {
            anchor_text: (!text.is_empty()).then_some(text),
            url: Some(url),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><style>.x{}</style></head><body>
<div id="mw-content-text"><div class="mw-heading"><h2 id="e">رویدادها</h2><span class="mw-editsection">[<a href="/w/index.php?action=edit">ویرایش</a>]</span></div>
<h3>فروردین</h3>
<ul><li>۱۲ – <a href="/wiki/%D8%AC%D9%86%DA%AF" title="جنگ">جنگ</a> آغاز شد<sup class="reference">[۱]</sup></li>
<li>۱۵ – <a href="/wiki/X_Y" class="new">قرمز</a> &amp; <a href="/wiki/Help:Z">راهنما</a></li></ul>
</div></body></html>"#;

    #[test]
    fn page_text_breaks_blocks_and_drops_chrome() {
        let t = page_text(PAGE);
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines, vec!["رویدادها", "فروردین", "۱۲ – جنگ آغاز شد", "۱۵ – قرمز & راهنما"]);
    }

    #[test]
    fn harvest_keeps_live_article_links() {
        let got = harvest_anchors(PAGE);
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].anchor_text.as_deref(), Some("جنگ"));
        assert_eq!(got[0].url.as_deref(), Some("https://fa.wikipedia.org/wiki/جنگ"));
        assert_eq!(got[1].anchor_text.as_deref(), Some("قرمز"));
    }

    #[test]
    fn attr_value_quotes() {
        assert_eq!(attr_value(r#"<a href="/wiki/A" title='B c'>"#, "title").as_deref(), Some("B c"));
        assert_eq!(attr_value("<a href=/wiki/A>", "href").as_deref(), Some("/wiki/A"));
        assert_eq!(attr_value("<a>", "href"), None);
    }
}
