use crate::{ClickTarget, JobFields, PageLink};

/// Everything the controller needs from a rendered page, captured at load time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageSnapshot {
    pub url: String,
    /// The URL-entry form, when the page has one.
    pub form: Option<FormSnapshot>,
    /// Whether a notification host container exists.
    pub has_container: bool,
    pub rows: Vec<RowSnapshot>,
    /// Every delete control, in document order.
    pub delete_controls: Vec<ClickTarget>,
    /// Current value of the search box, when the page has one.
    pub search_value: Option<String>,
    pub has_refresh: bool,
    pub pagination: Vec<PageLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub input_value: String,
    pub button_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSnapshot {
    pub table_row: bool,
    pub job_ids: Vec<String>,
    pub fields: Option<JobFields>,
    pub posted: Option<String>,
}
