// src/notify.rs
//! Teams webhook delivery. One POST per alert, no retry: dedup recording in
//! the pipeline treats every send as "attempted" regardless of the outcome.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::MonitorError;
use crate::http::HttpClient;

/// Payload for one qualifying (registrant, filing) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub company_name: String,
    pub ticker: Option<String>,
    pub document_url: String,
    pub pub_date: String,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), MonitorError>;
}

// Legacy Office 365 connector card schema.
#[derive(Serialize)]
struct MessageCard {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "themeColor")]
    theme_color: &'static str,
    title: &'static str,
    text: String,
    #[serde(rename = "potentialAction")]
    potential_action: Vec<OpenUriAction>,
}

#[derive(Serialize)]
struct OpenUriAction {
    #[serde(rename = "@type")]
    action_type: &'static str,
    name: &'static str,
    targets: Vec<UriTarget>,
}

#[derive(Serialize)]
struct UriTarget {
    os: &'static str,
    uri: String,
}

impl MessageCard {
    fn for_disclosure(n: &Notification) -> Self {
        let ticker = n.ticker.as_deref().unwrap_or("n/a");
        Self {
            context: "http://schema.org/extensions",
            card_type: "MessageCard",
            theme_color: "0076D7",
            title: "Material Cybersecurity Incident Detected",
            text: format!(
                "A Material Cybersecurity Incident has been disclosed by {} (Ticker: {}), published on {}.",
                n.company_name, ticker, n.pub_date
            ),
            potential_action: vec![OpenUriAction {
                action_type: "OpenUri",
                name: "View SEC Filing",
                targets: vec![UriTarget {
                    os: "default",
                    uri: n.document_url.clone(),
                }],
            }],
        }
    }
}

pub struct TeamsNotifier {
    webhook_url: String,
    http: HttpClient,
}

impl TeamsNotifier {
    pub fn new(webhook_url: String, http: HttpClient) -> Self {
        Self { webhook_url, http }
    }
}

#[async_trait]
impl NotificationSink for TeamsNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), MonitorError> {
        let card = MessageCard::for_disclosure(notification);
        let (status, body) = self.http.post_json(&self.webhook_url, &card).await?;
        if !status.is_success() {
            tracing::error!(%status, body, "Teams webhook rejected notification");
            return Err(MonitorError::Status {
                url: self.webhook_url.clone(),
                status,
            });
        }
        Ok(())
    }
}
