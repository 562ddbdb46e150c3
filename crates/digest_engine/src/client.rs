use std::time::Duration;

use digest_logging::{digest_debug, digest_warn};
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, FetchError};

pub const DEFAULT_ENDPOINT: &str =
    "https://article-extractor-and-summarizer.p.rapidapi.com/summarize";
pub const DEFAULT_API_HOST: &str = "article-extractor-and-summarizer.p.rapidapi.com";

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

#[derive(Debug, Clone)]
pub struct SummarySettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_host: Option<String>,
    /// Requested summary length, in paragraphs.
    pub summary_length: u32,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_host: Some(DEFAULT_API_HOST.to_string()),
            summary_length: 3,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

#[async_trait::async_trait]
pub trait SummaryClient: Send + Sync {
    async fn fetch_summary(&self, article_url: &str) -> Result<String, FetchError>;
}

/// Response envelope: either `summary` or `error` is expected to be set.
#[derive(Debug, Deserialize)]
struct SummaryBody {
    summary: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestSummaryClient {
    settings: SummarySettings,
}

impl ReqwestSummaryClient {
    pub fn new(settings: SummarySettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn request_url(&self, article_url: &str) -> Result<Url, FetchError> {
        Url::parse(article_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let mut request_url = Url::parse(&self.settings.endpoint).map_err(|err| {
            FetchError::new(FailureKind::InvalidUrl, format!("invalid endpoint: {err}"))
        })?;
        request_url
            .query_pairs_mut()
            .append_pair("url", article_url)
            .append_pair("length", &self.settings.summary_length.to_string());
        Ok(request_url)
    }
}

#[async_trait::async_trait]
impl SummaryClient for ReqwestSummaryClient {
    async fn fetch_summary(&self, article_url: &str) -> Result<String, FetchError> {
        let request_url = self.request_url(article_url)?;
        let client = self.build_client()?;

        let mut request = client.get(request_url);
        if let Some(key) = self.settings.api_key.as_deref() {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(host) = self.settings.api_host.as_deref() {
            request = request.header(API_HOST_HEADER, host);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_reqwest_error)?;
        digest_debug!(
            "Summary response status={} body_len={} url={}",
            status,
            body.len(),
            article_url
        );

        if !status.is_success() {
            let message = error_detail(&body).unwrap_or_else(|| status.to_string());
            digest_warn!("Summary request failed with {}: {}", status, message);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let parsed: SummaryBody = serde_json::from_str(&body).map_err(|err| {
            FetchError::new(
                FailureKind::InvalidResponse,
                format!("could not parse summary response: {err}"),
            )
        })?;

        if let Some(error) = parsed.error.filter(|error| !error.trim().is_empty()) {
            return Err(FetchError::new(FailureKind::Api, error));
        }

        match parsed.summary {
            Some(summary) if !summary.is_empty() => Ok(summary),
            _ => Err(FetchError::new(
                FailureKind::MissingSummary,
                "The response did not contain a summary.",
            )),
        }
    }
}

fn error_detail(body: &str) -> Option<String> {
    serde_json::from_str::<SummaryBody>(body)
        .ok()
        .and_then(|parsed| parsed.error)
        .filter(|error| !error.trim().is_empty())
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, "The request timed out.");
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
