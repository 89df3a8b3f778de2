use crate::{ClickTarget, JobRow, RowKey, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub page_url: String,
    pub form: Option<FormView>,
    pub alert: Option<AlertView>,
    pub jobs: Vec<JobRowView>,
    pub delete_controls: Vec<DeleteControlView>,
    pub search_query: Option<String>,
    pub refresh_available: bool,
    pub pagination: Vec<PageLinkView>,
    pub submitting: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub input: String,
    pub button_label: String,
    pub button_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub key: RowKey,
    pub job_id: Option<String>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub posted: Option<String>,
    pub visible: bool,
}

impl JobRowView {
    pub(crate) fn from_row(row: &JobRow) -> Self {
        let fields = row.fields.clone().unwrap_or_default();
        Self {
            key: row.key,
            job_id: row.job_ids.first().cloned(),
            title: fields.title,
            company: fields.company,
            location: fields.location,
            posted: row.posted.clone(),
            visible: row.visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControlView {
    pub job_id: String,
    pub job_title: String,
    /// Attributes to replay when the user activates this control.
    pub target: ClickTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinkView {
    pub index: usize,
    pub label: String,
    pub href: Option<String>,
}
