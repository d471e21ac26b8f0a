// src/feed.rs
//! EDGAR XBRL RSS feed: fetch, parse, and filter filings.

use async_trait::async_trait;
use quick_xml::de::from_str;
use serde::Deserialize;

use crate::error::MonitorError;
use crate::http::HttpClient;

/// One filing item from the feed. Rebuilt every poll cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filing {
    /// Registrant CIK number, the dedup key.
    pub cik: String,
    pub company_name: String,
    pub form_type: String,
    /// Publication date as the feed gives it (RFC 2822 string, kept verbatim).
    pub pub_date: String,
    /// All attached document URLs, in feed order.
    pub documents: Vec<String>,
}

impl Filing {
    /// Only HTML-like attachments are worth inspecting for disclosure text.
    pub fn html_documents(&self) -> impl Iterator<Item = &str> {
        self.documents
            .iter()
            .map(String::as_str)
            .filter(|u| is_html_document(u))
    }
}

pub fn is_html_document(url: &str) -> bool {
    url.ends_with(".htm") || url.ends_with(".html")
}

#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_filings(&self) -> Result<Vec<Filing>, MonitorError>;
}

// Serde mirror of the feed schema. quick-xml's serde deserializer strips
// namespace prefixes, so the renames use the local names without `edgar:`.
#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "xbrlFiling")]
    filing: Option<XbrlFiling>,
}

#[derive(Debug, Deserialize)]
struct XbrlFiling {
    #[serde(rename = "companyName")]
    company_name: String,
    #[serde(rename = "formType")]
    form_type: String,
    #[serde(rename = "cikNumber")]
    cik_number: String,
    #[serde(rename = "xbrlFiles")]
    files: Option<XbrlFiles>,
}

#[derive(Debug, Deserialize)]
struct XbrlFiles {
    #[serde(rename = "xbrlFile", default)]
    files: Vec<XbrlFile>,
}

#[derive(Debug, Deserialize)]
struct XbrlFile {
    #[serde(rename = "@url")]
    url: Option<String>,
}

/// Parse the raw feed XML into filings. Items without an `edgar:xbrlFiling`
/// block carry nothing we can act on and are dropped.
pub fn parse_feed(xml: &str) -> Result<Vec<Filing>, MonitorError> {
    let rss: Rss = from_str(xml).map_err(|e| MonitorError::parse("edgar rss feed", e))?;

    let mut out = Vec::with_capacity(rss.channel.items.len());
    for item in rss.channel.items {
        let Some(filing) = item.filing else {
            continue;
        };
        let documents = filing
            .files
            .map(|f| f.files.into_iter().filter_map(|x| x.url).collect())
            .unwrap_or_default();

        out.push(Filing {
            cik: filing.cik_number,
            company_name: filing.company_name,
            form_type: filing.form_type,
            pub_date: item.pub_date.unwrap_or_default(),
            documents,
        });
    }
    Ok(out)
}

/// Live feed source: GET the configured RSS URL and parse it.
pub struct EdgarFeed {
    url: String,
    http: HttpClient,
}

impl EdgarFeed {
    pub fn new(url: String, http: HttpClient) -> Self {
        Self { url, http }
    }
}

#[async_trait]
impl FeedSource for EdgarFeed {
    async fn fetch_filings(&self) -> Result<Vec<Filing>, MonitorError> {
        let body = self.http.get_text(&self.url).await?;
        parse_feed(&body)
    }
}
