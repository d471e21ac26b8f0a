// src/http.rs
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::MonitorError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared outbound HTTP client.
///
/// Carries the descriptive User-Agent the SEC requires on every request and
/// enforces a minimum pause after every call, so the whole process stays
/// under the upstream rate limit no matter which component is talking.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    delay: Duration,
}

impl HttpClient {
    pub fn new(user_agent: &str, delay: Duration) -> Result<Self, MonitorError> {
        let inner = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MonitorError::transport("client builder", e))?;
        Ok(Self { inner, delay })
    }

    async fn pace(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    pub async fn get_text(&self, url: &str) -> Result<String, MonitorError> {
        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| MonitorError::transport(url, e))?;
        self.pace().await;
        let status = resp.status();
        if !status.is_success() {
            return Err(MonitorError::Status {
                url: url.to_string(),
                status,
            });
        }
        resp.text()
            .await
            .map_err(|e| MonitorError::transport(url, e))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MonitorError> {
        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| MonitorError::transport(url, e))?;
        self.pace().await;
        let status = resp.status();
        if !status.is_success() {
            return Err(MonitorError::Status {
                url: url.to_string(),
                status,
            });
        }
        resp.json::<T>()
            .await
            .map_err(|e| MonitorError::transport(url, e))
    }

    /// POST a JSON body and hand back status plus response text, so the
    /// caller can log rejection bodies without the client deciding policy.
    pub async fn post_json<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<(StatusCode, String), MonitorError> {
        let resp = self
            .inner
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| MonitorError::transport(url, e))?;
        self.pace().await;
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        Ok((status, text))
    }
}
