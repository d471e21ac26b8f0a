// src/config.rs
//! Env-driven configuration, loaded once at startup. The webhook URL and the
//! SEC User-Agent have no sane defaults and are required; everything else
//! falls back to the reference deployment values.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Context, Result};

pub const DEFAULT_FEED_URL: &str = "https://www.sec.gov/Archives/edgar/usgaap.rss.xml";
pub const DEFAULT_SUBMISSIONS_BASE: &str = "https://data.sec.gov/submissions";
const DEFAULT_SIGNAL_PHRASES: &[&str] = &["Material Cybersecurity Incidents", "Item 1.05"];
const DEFAULT_FORM_TYPES: &[&str] = &["8-K", "8-K/A", "6-K", "FORM 8-K"];
const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;
const DEFAULT_REQUEST_DELAY_MS: u64 = 300;
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
pub struct Config {
    /// Teams incoming-webhook URL notifications are POSTed to. Required.
    pub webhook_url: String,
    /// Descriptive client identification, e.g. "Example Corp/1.0 (soc@example.com)".
    /// The SEC acceptable-use policy requires it on every request.
    pub user_agent: String,
    pub feed_url: String,
    pub submissions_base: String,
    pub poll_interval: Duration,
    /// Minimum pause after every outbound HTTP call.
    pub request_delay: Duration,
    /// Working directory holding disclosures.json and debug.log.
    pub data_dir: PathBuf,
    pub signal_phrases: Vec<String>,
    pub form_types: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let webhook_url = require("TEAMS_WEBHOOK_URL")?;
        let user_agent = require("SEC_USER_AGENT")?;

        let poll_interval_secs = parse_u64("POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let request_delay_ms = parse_u64("REQUEST_DELAY_MS", DEFAULT_REQUEST_DELAY_MS)?;

        Ok(Self {
            webhook_url,
            user_agent,
            feed_url: env_or("EDGAR_FEED_URL", DEFAULT_FEED_URL),
            submissions_base: env_or("SEC_SUBMISSIONS_BASE", DEFAULT_SUBMISSIONS_BASE),
            poll_interval: Duration::from_secs(poll_interval_secs),
            request_delay: Duration::from_millis(request_delay_ms),
            data_dir: PathBuf::from(env_or("DATA_DIR", DEFAULT_DATA_DIR)),
            signal_phrases: list_or("SIGNAL_PHRASES", DEFAULT_SIGNAL_PHRASES),
            form_types: list_or("FORM_TYPES", DEFAULT_FORM_TYPES),
        })
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("disclosures.json")
    }
}

fn require(key: &str) -> Result<String> {
    let val = env::var(key).with_context(|| format!("{key} must be set"))?;
    ensure!(!val.trim().is_empty(), "{key} must not be empty");
    Ok(val)
}

fn env_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

fn parse_u64(key: &str, default: u64) -> Result<u64> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be an integer, got {v:?}")),
        _ => Ok(default),
    }
}

/// Comma-separated list; items trimmed, empties dropped, order preserved
/// (document inspection respects phrase order).
fn list_or(key: &str, default: &[&str]) -> Vec<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        _ => default.iter().map(|s| s.to_string()).collect(),
    }
}
