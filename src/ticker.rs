// src/ticker.rs
//! Best-effort CIK → ticker symbol resolution via the EDGAR submissions API.
//! Every failure mode degrades to `None`; an alert without a ticker is still
//! an alert.

use async_trait::async_trait;
use serde::Deserialize;

use crate::http::HttpClient;

#[async_trait]
pub trait TickerResolver: Send + Sync {
    async fn resolve(&self, cik: &str) -> Option<String>;
}

#[derive(Debug, Deserialize)]
struct Submissions {
    #[serde(default)]
    tickers: Vec<String>,
}

pub struct EdgarTickerResolver {
    base_url: String,
    http: HttpClient,
}

impl EdgarTickerResolver {
    pub fn new(base_url: String, http: HttpClient) -> Self {
        Self { base_url, http }
    }

    fn submissions_url(&self, cik: &str) -> String {
        // The submissions API wants the CIK zero-padded to ten digits.
        format!("{}/CIK{:0>10}.json", self.base_url.trim_end_matches('/'), cik)
    }
}

#[async_trait]
impl TickerResolver for EdgarTickerResolver {
    async fn resolve(&self, cik: &str) -> Option<String> {
        let url = self.submissions_url(cik);
        match self.http.get_json::<Submissions>(&url).await {
            Ok(subs) => match subs.tickers.into_iter().next() {
                Some(ticker) => Some(ticker),
                None => {
                    tracing::error!(cik, "registrant has no listed ticker symbols");
                    None
                }
            },
            Err(e) => {
                tracing::error!(cik, error = %e, "ticker lookup failed");
                None
            }
        }
    }
}
