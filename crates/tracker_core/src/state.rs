use crate::view_model::{
    AlertView, AppViewModel, DeleteControlView, FormView, JobRowView, PageLinkView,
};
use crate::{
    ClickTarget, DeleteRequest, Effect, JobRow, JobTable, NotificationSlot, PageLink,
    PageSnapshot, RowKey, Severity, SubmissionPhase, SubmitButton, UrlForm,
};

/// Model of the currently displayed page plus any workflow in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub(crate) page_url: String,
    pub(crate) form: Option<UrlForm>,
    pub(crate) submission: SubmissionPhase,
    pub(crate) alerts: NotificationSlot,
    pub(crate) table: JobTable,
    pub(crate) delete_controls: Vec<ClickTarget>,
    pub(crate) search: Option<String>,
    pub(crate) has_refresh: bool,
    pub(crate) pagination: Vec<PageLink>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the controller to a freshly loaded page.
    pub fn from_page(page: PageSnapshot) -> Self {
        let rows = page
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| JobRow {
                key: RowKey(index),
                table_row: row.table_row,
                job_ids: row.job_ids,
                fields: row.fields,
                posted: row.posted,
                visible: true,
            })
            .collect();

        Self {
            page_url: page.url,
            form: page.form.map(|form| UrlForm {
                input: form.input_value,
                button: SubmitButton::new(form.button_label),
            }),
            submission: SubmissionPhase::Idle,
            alerts: NotificationSlot::new(page.has_container),
            table: JobTable::new(rows),
            delete_controls: page.delete_controls,
            search: page.search_value,
            has_refresh: page.has_refresh,
            pagination: page.pagination,
            dirty: true,
        }
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn submission(&self) -> &SubmissionPhase {
        &self.submission
    }

    pub fn alerts(&self) -> &NotificationSlot {
        &self.alerts
    }

    pub fn table(&self) -> &JobTable {
        &self.table
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page_url: self.page_url.clone(),
            form: self.form.as_ref().map(|form| FormView {
                input: form.input.clone(),
                button_label: form.button.label.clone(),
                button_enabled: form.button.enabled,
            }),
            alert: self.alerts.current().map(|alert| AlertView {
                message: alert.message.clone(),
                severity: alert.severity,
            }),
            jobs: self.table.rows().iter().map(JobRowView::from_row).collect(),
            delete_controls: self
                .delete_controls
                .iter()
                .filter_map(|target| {
                    DeleteRequest::from_target(target).map(|request| DeleteControlView {
                        job_id: request.job_id,
                        job_title: request.job_title,
                        target: target.clone(),
                    })
                })
                .collect(),
            search_query: self.search.clone(),
            refresh_available: self.has_refresh,
            pagination: self
                .pagination
                .iter()
                .enumerate()
                .map(|(index, link)| PageLinkView {
                    index,
                    label: link.label.clone(),
                    href: link.href.clone(),
                })
                .collect(),
            submitting: matches!(self.submission, SubmissionPhase::Submitting { .. }),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
    ) -> Vec<Effect> {
        self.dirty = true;
        self.alerts.show(message, severity)
    }
}
