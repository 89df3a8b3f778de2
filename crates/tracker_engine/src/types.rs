use serde::Deserialize;

use crate::ParsedPage;

pub type TimerId = u64;
/// Caller-chosen id echoed back on the completion of a crawl or delete.
pub type RequestId = u64;

/// Success body of the tracker API (`{"message": ..., "status": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiFailure {
    /// Server-supplied explanation, only present on rejections.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiFailure::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    CrawlCompleted {
        request: RequestId,
        url: String,
        result: Result<ApiMessage, ApiFailure>,
    },
    DeleteCompleted {
        request: RequestId,
        job_id: String,
        result: Result<ApiMessage, ApiFailure>,
    },
    PageLoaded {
        url: String,
        result: Result<ParsedPage, ApiFailure>,
    },
    TimerFired(TimerId),
}
