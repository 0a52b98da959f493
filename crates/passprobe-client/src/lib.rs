//! HTTP client for the PassProbe analysis service.
//!
//! Every scoring and generation decision is delegated to the service; this
//! crate only shapes requests, enforces timeouts, and decodes responses into
//! the `passprobe-core` model.

use log::debug;
use passprobe_core::{AnalysisResult, PassprobeError, PassprobeResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PasswordRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeneratedPassword {
    password: String,
}

#[derive(Debug, Deserialize)]
struct GeneratedPassphrase {
    passphrase: String,
}

#[derive(Debug, Deserialize)]
struct LeakCheckResponse {
    #[serde(default)]
    similar: Vec<String>,
}

/// Client bound to one service base URL. Cheap to clone; the underlying
/// connection pool is shared.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Build a client for `base_url` with a per-request `timeout`. Trailing
    /// slashes on the base URL are ignored.
    pub fn new(base_url: &str, timeout: Duration) -> PassprobeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| PassprobeError::Network(err.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Score a password. The service owns all strength heuristics.
    pub async fn analyze(&self, password: &str) -> PassprobeResult<AnalysisResult> {
        self.post_json("/analyze", &PasswordRequest { password })
            .await
    }

    /// Ask the service for a random strong password.
    pub async fn generate(&self) -> PassprobeResult<String> {
        let body: GeneratedPassword = self.get_json("/generate").await?;
        Ok(body.password)
    }

    /// Ask the service for a random passphrase.
    pub async fn generate_passphrase(&self) -> PassprobeResult<String> {
        let body: GeneratedPassphrase = self.get_json("/generate-passphrase").await?;
        Ok(body.passphrase)
    }

    /// Look up leaked passwords similar to this one.
    pub async fn leak_check(&self, password: &str) -> PassprobeResult<Vec<String>> {
        let body: LeakCheckResponse = self
            .post_json("/leak-check", &PasswordRequest { password })
            .await?;
        Ok(body.similar)
    }

    async fn post_json<B, T>(&self, route: &str, body: &B) -> PassprobeResult<T>
    where
        B: Serialize,
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{route}", self.base_url);
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| PassprobeError::Network(err.to_string()))?;
        decode(response).await
    }

    async fn get_json<T>(&self, route: &str) -> PassprobeResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{route}", self.base_url);
        debug!("GET {url}");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| PassprobeError::Network(err.to_string()))?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> PassprobeResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = body.trim();
        return Err(PassprobeError::Service(if detail.is_empty() {
            format!("service answered {status}")
        } else {
            format!("service answered {status}: {detail}")
        }));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| PassprobeError::Service(format!("unreadable response body: {err}")))
}
