use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the service said about a URL, when it said anything well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    Summary(String),
    /// `success` missing or false, or a success with no summary text. Carries
    /// the service's reason if it gave one.
    Failure(Option<String>),
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network failure, unparseable body or an error status without a
    /// summary payload. `detail` is the body's `detail` field when present.
    #[error("transport fault: {reason}")]
    Transport {
        reason: String,
        detail: Option<String>,
    },
}

impl ClientError {
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Transport { detail, .. } => detail.as_deref(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport {
            reason: err.to_string(),
            detail: None,
        }
    }
}

#[async_trait]
pub trait SummarizationClient: Send + Sync {
    async fn summarize(&self, url: &str) -> Result<SummaryOutcome, ClientError>;

    async fn health(&self) -> Result<(), ClientError>;
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    // Absent means not successful.
    #[serde(default)]
    success: bool,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// How long the startup health probe may take. `summarize` has no limit.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Talks to the summarization service over HTTP.
pub struct HttpSummarizationClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
}

impl HttpSummarizationClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            health_timeout: HEALTH_TIMEOUT,
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SummarizationClient for HttpSummarizationClient {
    async fn summarize(&self, url: &str) -> Result<SummaryOutcome, ClientError> {
        let endpoint = format!("{}/summarize", self.base_url);
        let res = self
            .client
            .post(&endpoint)
            .json(&SummarizeRequest { url })
            .send()
            .await?;
        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "summarize response");

        if status.is_success() {
            let payload: SummarizeResponse =
                serde_json::from_str(&body).map_err(|e| ClientError::Transport {
                    reason: format!("invalid response body: {}", e),
                    detail: None,
                })?;
            // A success without summary text leaves nothing to show or copy.
            let summary = payload.summary.filter(|s| !s.trim().is_empty());
            return Ok(match (payload.success, summary) {
                (true, Some(summary)) => SummaryOutcome::Summary(summary),
                (true, None) => SummaryOutcome::Failure(None),
                (false, _) => SummaryOutcome::Failure(payload.error),
            });
        }

        // Error statuses still count as a structured failure when the body
        // says `success: false`; anything else is a transport fault.
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody {
                success: Some(false),
                error,
                ..
            }) => Ok(SummaryOutcome::Failure(error)),
            Ok(ErrorBody { detail, .. }) => Err(ClientError::Transport {
                reason: format!("HTTP {}", status),
                detail,
            }),
            Err(_) => Err(ClientError::Transport {
                reason: format!("HTTP {}", status),
                detail: None,
            }),
        }
    }

    async fn health(&self) -> Result<(), ClientError> {
        let endpoint = format!("{}/health", self.base_url);
        let res = self
            .client
            .get(&endpoint)
            .timeout(self.health_timeout)
            .send()
            .await?;
        if res.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Transport {
                reason: format!("HTTP {}", res.status()),
                detail: None,
            })
        }
    }
}
