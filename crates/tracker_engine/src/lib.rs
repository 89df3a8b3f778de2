//! Job tracker engine: API client, page reader and the IO/timer worker.
mod api;
mod engine;
mod page;
mod types;

pub use api::{ApiSettings, ReqwestTrackerApi, TrackerApi, CRAWL_ENDPOINT, JOBS_ENDPOINT};
pub use engine::EngineHandle;
pub use page::{read_page, ParsedControl, ParsedForm, ParsedLink, ParsedPage, ParsedRow};
pub use types::{ApiFailure, ApiMessage, EngineEvent, RequestId, TimerId};
