// src/inspect.rs
//! Document inspection: pull a filing document and look for the disclosure
//! signal phrases in its visible text.

use async_trait::async_trait;
use metrics::counter;
use once_cell::sync::OnceCell;
use regex::Regex;

use crate::error::MonitorError;
use crate::http::HttpClient;

/// Extract visible text from an HTML document: script/style blocks dropped,
/// tags stripped, entities decoded, whitespace collapsed. Case and wording
/// are preserved so phrase matching stays exact.
pub fn extract_text(html: &str) -> String {
    static RE_SCRIPT: OnceCell<Regex> = OnceCell::new();
    let re_script = RE_SCRIPT.get_or_init(|| {
        Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)>").unwrap()
    });
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").unwrap());
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());

    let out = re_script.replace_all(html, " ");
    let out = re_tags.replace_all(&out, " ");
    let out = html_escape::decode_html_entities(&out).to_string();
    re_ws.replace_all(&out, " ").trim().to_string()
}

/// Compiled set of signal phrases. Each phrase matches as a whole-word-bounded,
/// case-sensitive substring of the document text.
pub struct SignalMatcher {
    patterns: Vec<Regex>,
}

impl SignalMatcher {
    pub fn new<S: AsRef<str>>(phrases: &[S]) -> Result<Self, MonitorError> {
        let mut patterns = Vec::with_capacity(phrases.len());
        for phrase in phrases {
            let phrase = phrase.as_ref().trim();
            if phrase.is_empty() {
                continue;
            }
            let pattern = format!(r"\b{}\b", regex::escape(phrase));
            patterns.push(
                Regex::new(&pattern).map_err(|e| MonitorError::parse("signal phrase", e))?,
            );
        }
        Ok(Self { patterns })
    }

    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, MonitorError>;
}

pub struct HttpDocumentFetcher {
    http: HttpClient,
}

impl HttpDocumentFetcher {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl DocumentFetcher for HttpDocumentFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, MonitorError> {
        self.http.get_text(url).await
    }
}

/// Fetches documents and tests them against the signal phrases. A failed
/// fetch is not an error for the pipeline, just "no signal here"; this
/// component never lets a bad document abort the cycle.
pub struct DocumentInspector {
    fetcher: Box<dyn DocumentFetcher>,
    matcher: SignalMatcher,
}

impl DocumentInspector {
    pub fn new(fetcher: Box<dyn DocumentFetcher>, matcher: SignalMatcher) -> Self {
        Self { fetcher, matcher }
    }

    pub async fn inspect(&self, url: &str) -> bool {
        let body = match self.fetcher.fetch_text(url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(url, error = %e, "document fetch failed, treating as no signal");
                counter!("document_fetch_errors_total").increment(1);
                return false;
            }
        };
        self.matcher.matches(&extract_text(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_strips_markup_and_decodes_entities() {
        let html = r#"<html><head><style>p { color: red; }</style></head>
            <body><p>Item&nbsp;1.05 &amp; more</p><script>var x = "<b>";</script></body></html>"#;
        // &nbsp; decodes to U+00A0, which the whitespace collapse folds to a
        // plain space, so nbsp-separated phrases still match exactly.
        let text = extract_text(html);
        assert_eq!(text, "Item 1.05 & more");
    }

    #[test]
    fn matcher_is_case_sensitive() {
        let m = SignalMatcher::new(&["Item 1.05"]).unwrap();
        assert!(m.matches("disclosed under Item 1.05 of Form 8-K"));
        assert!(!m.matches("disclosed under item 1.05 of Form 8-K"));
    }

    #[test]
    fn matcher_requires_word_boundaries() {
        let m = SignalMatcher::new(&["Item 1.0"]).unwrap();
        // "1.05" continues with a word character, so "Item 1.0" must not hit.
        assert!(!m.matches("Item 1.05 Material Cybersecurity Incidents"));
        assert!(m.matches("see Item 1.0 above"));
    }

    #[test]
    fn first_matching_phrase_wins() {
        let m =
            SignalMatcher::new(&["Material Cybersecurity Incidents", "Item 1.05"]).unwrap();
        assert!(m.matches("Item 1.05. Material Cybersecurity Incidents."));
        assert!(m.matches("Material Cybersecurity Incidents were reported"));
        assert!(!m.matches("routine results announcement"));
    }

    #[test]
    fn empty_phrases_are_skipped() {
        let m = SignalMatcher::new(&["", "  ", "Item 1.05"]).unwrap();
        assert!(m.matches("Item 1.05"));
        assert!(!m.matches(""));
    }
}
