use std::time::Duration;

use crate::AlertToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST` the URL to the crawl-trigger endpoint.
    PostCrawl { url: String },
    /// `DELETE` the job posting with this id.
    DeleteJob { job_id: String },
    ScheduleAlertExpiry { token: AlertToken, after: Duration },
    CancelAlertExpiry { token: AlertToken },
    /// One-shot timer that delivers `Msg::NavigationDue` once elapsed.
    ScheduleNavigation { target: String, after: Duration },
    /// Load `target` (absolute or relative to the tracker base URL) as the new page.
    Navigate { target: String },
    Reload { url: String },
}
