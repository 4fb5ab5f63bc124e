// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&zwnj;", "\u{200c}")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove any `[ ... ]` bracket tags (e.g. `[ویرایش]`, `[۱]`).
/// Greedy within each bracket pair, no nesting.
pub fn strip_brackets(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_bracket = false;
    for ch in s.chars() {
        match ch {
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            _ if !in_bracket => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Value of one decimal digit in ASCII, Persian (U+06F0..) or Arabic-Indic (U+0660..) form.
pub fn digit_value(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32),
        '\u{06F0}'..='\u{06F9}' => Some(ch as u32 - 0x06F0),
        '\u{0660}'..='\u{0669}' => Some(ch as u32 - 0x0660),
        _ => None,
    }
}

/// Parse a non-empty run of digits in any of the supported scripts.
pub fn parse_digits(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for ch in s.chars() {
        n = n.checked_mul(10)?.checked_add(digit_value(ch)?)?;
    }
    Some(n)
}

pub fn to_persian_digits(n: i64) -> String {
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(0x06F0 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Percent-decoded form of a URL path segment; returned unchanged if it is not valid UTF-8.
pub fn decode_url_part(part: &str) -> String {
    match urlencoding::decode(part) {
        Ok(s) => s.into_owned(),
        Err(_) => s!(part),
    }
}

/// Rewrite `https://host/wiki/%D8%...` into its readable Persian form.
pub fn readable_wiki_url(url: &str) -> String {
    match url.find("/wiki/") {
        Some(i) => {
            let (base, encoded) = url.split_at(i + "/wiki/".len());
            join!(base, &decode_url_part(encoded))
        }
        None => s!(url),
    }
}

pub fn first_two_words(s: &str) -> String {
    s.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}
