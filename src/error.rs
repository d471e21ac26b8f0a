// src/error.rs
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for the monitor. Components degrade locally (inspection
/// reports no signal, resolver returns None); only whole-cycle failures
/// (feed fetch/parse, dedup state load) bubble up to the scheduler.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: StatusCode },

    #[error("failed to parse {what}: {detail}")]
    Parse { what: &'static str, detail: String },

    #[error("dedup state at {path}: {detail}")]
    Storage { path: PathBuf, detail: String },
}

impl MonitorError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn parse(what: &'static str, detail: impl ToString) -> Self {
        Self::Parse {
            what,
            detail: detail.to_string(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        Self::Storage {
            path: path.into(),
            detail: detail.to_string(),
        }
    }
}
