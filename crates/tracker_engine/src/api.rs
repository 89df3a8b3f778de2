use std::time::Duration;

use serde::Serialize;
use tracker_logging::{tracker_debug, tracker_info};
use url::Url;

use crate::{ApiFailure, ApiMessage};

/// Path segments of the crawl-trigger endpoint, relative to the base URL.
pub const CRAWL_ENDPOINT: [&str; 3] = ["api", "jobs", "crawl"];
/// Path segments of the job collection; a job id is appended for deletes.
pub const JOBS_ENDPOINT: [&str; 2] = ["api", "jobs"];

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
}

impl ApiSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait TrackerApi: Send + Sync {
    /// `POST` the URL to the crawl-trigger endpoint.
    async fn trigger_crawl(&self, url: &str) -> Result<ApiMessage, ApiFailure>;

    /// `DELETE` one job posting.
    async fn delete_job(&self, job_id: &str) -> Result<ApiMessage, ApiFailure>;

    /// `GET` a server-rendered page and return its markup.
    async fn fetch_page(&self, url: &str) -> Result<String, ApiFailure>;
}

#[derive(Debug, Serialize)]
struct CrawlRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Clone)]
pub struct ReqwestTrackerApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestTrackerApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiFailure> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiFailure::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Resolves an absolute or base-relative address.
    pub fn resolve(&self, target: &str) -> Result<Url, ApiFailure> {
        self.settings
            .base_url
            .join(target)
            .map_err(|err| ApiFailure::InvalidUrl(format!("{target}: {err}")))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiFailure> {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiFailure::InvalidUrl(self.settings.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl TrackerApi for ReqwestTrackerApi {
    async fn trigger_crawl(&self, url: &str) -> Result<ApiMessage, ApiFailure> {
        let endpoint = self.endpoint(&CRAWL_ENDPOINT)?;
        tracker_info!("POST {} url={}", endpoint, url);
        let response = self
            .client
            .post(endpoint)
            .json(&CrawlRequest { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_message(response).await
    }

    async fn delete_job(&self, job_id: &str) -> Result<ApiMessage, ApiFailure> {
        let mut segments = JOBS_ENDPOINT.to_vec();
        segments.push(job_id);
        let endpoint = self.endpoint(&segments)?;
        tracker_info!("DELETE {}", endpoint);
        let response = self
            .client
            .delete(endpoint)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        read_message(response).await
    }

    async fn fetch_page(&self, url: &str) -> Result<String, ApiFailure> {
        let parsed = self.resolve(url)?;
        tracker_debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiFailure::Rejected {
                status: status.as_u16(),
                detail: detail_from_body(&body),
            });
        }
        response.text().await.map_err(map_reqwest_error)
    }
}

async fn read_message(response: reqwest::Response) -> Result<ApiMessage, ApiFailure> {
    let status = response.status();
    let body = response.text().await.map_err(map_reqwest_error)?;
    if !status.is_success() {
        return Err(ApiFailure::Rejected {
            status: status.as_u16(),
            detail: detail_from_body(&body),
        });
    }
    serde_json::from_str(&body).map_err(|err| ApiFailure::Malformed(err.to_string()))
}

/// Pulls a string `detail` out of an error body. Structured details
/// (validation error lists) are not shown to the user.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

fn map_reqwest_error(err: reqwest::Error) -> ApiFailure {
    if err.is_timeout() {
        return ApiFailure::Timeout(err.to_string());
    }
    if err.is_decode() {
        return ApiFailure::Malformed(err.to_string());
    }
    ApiFailure::Network(err.to_string())
}
