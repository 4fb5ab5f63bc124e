// src/translate.rs

// Translation service. Callers receive a `&dyn Translator`; nothing here is global.

use std::time::Duration;

use serde_json::Value;

use crate::config::consts::{
    CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS, TRANSLATE_ENDPOINT, TRANSLATION_ERROR, USER_AGENT,
};

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("translation request failed: {0}")]
    Http(String),
    #[error("unexpected translation response: {0}")]
    Parse(String),
    #[error("empty translation")]
    Empty,
}

pub trait Translator: Send + Sync {
    fn translate(&self, text: &str, src: &str, dest: &str) -> Result<String, TranslateError>;
}

/// Client for the public `translate_a/single` endpoint.
pub struct GtxTranslator {
    agent: ureq::Agent,
}

impl GtxTranslator {
    pub fn new() -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout_read(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build();
        Self { agent }
    }
}

impl Default for GtxTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl Translator for GtxTranslator {
    fn translate(&self, text: &str, src: &str, dest: &str) -> Result<String, TranslateError> {
        let body = self
            .agent
            .get(TRANSLATE_ENDPOINT)
            .query("client", "gtx")
            .query("sl", src)
            .query("tl", dest)
            .query("dt", "t")
            .query("q", text)
            .call()
            .map_err(|e| TranslateError::Http(e.to_string()))?
            .into_string()
            .map_err(|e| TranslateError::Http(e.to_string()))?;
        parse_gtx_response(&body)
    }
}

/// Response shape: `[[["translated", "source", ...], ...], null, "fa", ...]`.
/// Long inputs come back as several sentence chunks; they are concatenated.
pub fn parse_gtx_response(body: &str) -> Result<String, TranslateError> {
    let v: Value = serde_json::from_str(body).map_err(|e| TranslateError::Parse(e.to_string()))?;
    let chunks = v
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Parse(s!("missing sentence list")))?;

    let mut out = s!();
    for chunk in chunks {
        if let Some(part) = chunk.get(0).and_then(Value::as_str) {
            out.push_str(part);
        }
    }
    let out = out.trim().to_string();
    if out.is_empty() { Err(TranslateError::Empty) } else { Ok(out) }
}

/// Persian → English, or the error marker. Never fails.
pub fn to_english(translator: &dyn Translator, text: &str) -> String {
    if text.trim().is_empty() {
        return s!();
    }
    match translator.translate(text, "fa", "en") {
        Ok(t) => t,
        Err(e) => {
            loge!("translating {text:?}: {e}");
            s!(TRANSLATION_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;
    impl Translator for Failing {
        fn translate(&self, _: &str, _: &str, _: &str) -> Result<String, TranslateError> {
            Err(TranslateError::Http(s!("offline")))
        }
    }

    #[test]
    fn parses_chunked_response() {
        let body = r#"[[["Victory of the ","پیروزی",null,null,10],["revolution","انقلاب",null,null,10]],null,"fa"]"#;
        assert_eq!(parse_gtx_response(body).unwrap(), "Victory of the revolution");
    }

    #[test]
    fn bad_responses_are_errors() {
        assert!(matches!(parse_gtx_response("{}"), Err(TranslateError::Parse(_))));
        assert!(matches!(parse_gtx_response("[[]]"), Err(TranslateError::Empty)));
        assert!(matches!(parse_gtx_response("not json"), Err(TranslateError::Parse(_))));
    }

    #[test]
    fn failures_become_marker() {
        assert_eq!(to_english(&Failing, "سلام"), TRANSLATION_ERROR);
        assert_eq!(to_english(&Failing, "  "), "");
    }
}
