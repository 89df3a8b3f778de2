//! Job tracker core: the page model and the pure workflow state machine.
//!
//! Every user action and every IO completion arrives as a [`Msg`]; [`update`]
//! applies it and returns the [`Effect`]s the platform must execute.
mod deletion;
mod effect;
mod listing;
mod msg;
mod notice;
mod page;
mod reply;
mod state;
mod submission;
mod update;
mod validate;
mod view_model;

pub use deletion::{
    ClickTarget, ConfirmationGate, DeleteRequest, FixedAnswer, DELETE_FAILED_FALLBACK,
    DELETE_MARKER_CLASS, DELETE_SUCCEEDED_FALLBACK,
};
pub use effect::Effect;
pub use listing::{search_matches, JobFields, JobRow, JobTable, PageLink, RowKey};
pub use msg::Msg;
pub use notice::{AlertToken, Notification, NotificationSlot, Severity, ALERT_LIFETIME};
pub use page::{FormSnapshot, PageSnapshot, RowSnapshot};
pub use reply::{RequestError, ServerReply};
pub use state::AppState;
pub use submission::{
    SubmissionPhase, SubmitButton, UrlForm, BUSY_LABEL, CRAWL_FAILED_FALLBACK,
    CRAWL_STARTED_FALLBACK, EMPTY_URL_MESSAGE, INVALID_URL_MESSAGE, JOBS_VIEW_PATH,
    NAVIGATION_DELAY,
};
pub use update::update;
pub use validate::is_valid_url;
pub use view_model::{
    AlertView, AppViewModel, DeleteControlView, FormView, JobRowView, PageLinkView,
};
