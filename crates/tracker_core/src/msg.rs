use crate::{AlertToken, ClickTarget, PageSnapshot, RequestError, ServerReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A page finished loading; replaces the whole page model.
    PageLoaded(PageSnapshot),
    /// Navigation to `target` failed; the current page stays displayed.
    NavigationFailed { target: String, reason: String },
    /// User edited the URL input.
    UrlInputChanged(String),
    /// User submitted the URL form.
    UrlFormSubmitted,
    /// Crawl-trigger request finished.
    CrawlCompleted(Result<ServerReply, RequestError>),
    /// Any click on the page, observed by the delegated listener.
    Clicked(ClickTarget),
    /// Delete request for `job_id` finished.
    DeleteCompleted {
        job_id: String,
        result: Result<ServerReply, RequestError>,
    },
    /// User closed the notification.
    AlertDismissed,
    /// Expiry timer of a notification fired.
    AlertExpired { token: AlertToken },
    /// Delayed post-submission navigation is due.
    NavigationDue { target: String },
    /// User edited the search box.
    SearchChanged(String),
    /// User clicked the refresh control.
    RefreshClicked,
    /// User clicked the pagination link at `index` (document order).
    PageLinkClicked { index: usize },
}
