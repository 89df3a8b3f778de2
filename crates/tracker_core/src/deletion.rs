use std::collections::BTreeMap;

use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::{AppState, Effect, RequestError, ServerReply, Severity};

/// Class that marks an element as a delete control.
pub const DELETE_MARKER_CLASS: &str = "delete-job-btn";
pub const DELETE_SUCCEEDED_FALLBACK: &str = "Job posting deleted.";
pub const DELETE_FAILED_FALLBACK: &str = "Failed to delete the job posting.";

const JOB_ID_KEY: &str = "job-id";
const JOB_TITLE_KEY: &str = "job-title";

/// The element a click landed on, as seen by the delegated listener.
///
/// `data` holds `data-*` attributes keyed without the prefix (`job-id`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickTarget {
    pub classes: Vec<String>,
    pub data: BTreeMap<String, String>,
}

impl ClickTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Shorthand for the attributes the page puts on a delete control.
    pub fn delete_control(job_id: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self::new()
            .with_class(DELETE_MARKER_CLASS)
            .with_data(JOB_ID_KEY, job_id)
            .with_data(JOB_TITLE_KEY, job_title)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn data(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }
}

/// Synchronous yes/no decision taken before a destructive request is issued.
pub trait ConfirmationGate {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Gate that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl ConfirmationGate for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Job a delete control refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub job_id: String,
    pub job_title: String,
}

impl DeleteRequest {
    /// Reads the request off a click target; `None` unless it is a delete control with an id.
    pub fn from_target(target: &ClickTarget) -> Option<Self> {
        if !target.has_class(DELETE_MARKER_CLASS) {
            return None;
        }
        let job_id = target.data(JOB_ID_KEY)?.to_string();
        let job_title = target
            .data(JOB_TITLE_KEY)
            .map(str::to_string)
            .unwrap_or_else(|| job_id.clone());
        Some(Self { job_id, job_title })
    }

    pub fn prompt(&self) -> String {
        format!("Delete the job posting \"{}\"?", self.job_title)
    }
}

pub(crate) fn on_click(target: ClickTarget, gate: &dyn ConfirmationGate) -> Vec<Effect> {
    if !target.has_class(DELETE_MARKER_CLASS) {
        return Vec::new();
    }
    let Some(request) = DeleteRequest::from_target(&target) else {
        tracker_warn!("Delete control without a job id; ignoring click");
        return Vec::new();
    };

    if !gate.confirm(&request.prompt()) {
        tracker_debug!("Deletion of job {} declined", request.job_id);
        return Vec::new();
    }

    tracker_info!(
        "Deleting job id={} title={}",
        request.job_id,
        request.job_title
    );
    vec![Effect::DeleteJob {
        job_id: request.job_id,
    }]
}

pub(crate) fn on_delete_completed(
    state: &mut AppState,
    job_id: String,
    result: Result<ServerReply, RequestError>,
) -> Vec<Effect> {
    match result {
        Ok(reply) => {
            let effects =
                state.notify(reply.message_or(DELETE_SUCCEEDED_FALLBACK), Severity::Success);
            match state.table.remove_row_tagged(&job_id) {
                Some(row) => {
                    tracker_info!("Removed row {:?} for job {}", row.key, job_id);
                    // Controls rendered inside the row go with it.
                    state.delete_controls.retain(|control| {
                        control
                            .data(JOB_ID_KEY)
                            .map_or(true, |id| !row.job_ids.iter().any(|tagged| tagged == id))
                    });
                    state.mark_dirty();
                }
                None => tracker_debug!("No row tagged with job {}; nothing to remove", job_id),
            }
            effects
        }
        Err(err) => {
            tracker_warn!("Delete of job {} failed: {:?}", job_id, err);
            state.notify(err.user_message(DELETE_FAILED_FALLBACK), Severity::Danger)
        }
    }
}
