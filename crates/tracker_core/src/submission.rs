use std::time::Duration;

use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::{is_valid_url, AppState, Effect, RequestError, ServerReply, Severity};

/// Label shown on the submit control while a crawl request is outstanding.
pub const BUSY_LABEL: &str = "Starting crawl...";
pub const EMPTY_URL_MESSAGE: &str = "Please enter a URL.";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";
pub const CRAWL_STARTED_FALLBACK: &str = "Crawling started.";
pub const CRAWL_FAILED_FALLBACK: &str = "Failed to start crawling.";
/// Where the user lands after a crawl was accepted.
pub const JOBS_VIEW_PATH: &str = "/jobs";
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(2_000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub enabled: bool,
    pub label: String,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            enabled: true,
            label: label.into(),
        }
    }

    /// Disables the control behind `busy_label` and returns the label it replaced.
    pub fn show_loading(&mut self, busy_label: &str) -> String {
        self.enabled = false;
        std::mem::replace(&mut self.label, busy_label.to_string())
    }

    pub fn hide_loading(&mut self, original_label: String) {
        self.label = original_label;
        self.enabled = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlForm {
    pub input: String,
    pub button: SubmitButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting {
        url: String,
        original_label: String,
    },
}

pub(crate) fn on_input_changed(state: &mut AppState, text: String) -> Vec<Effect> {
    if let Some(form) = state.form.as_mut() {
        form.input = text;
        state.mark_dirty();
    }
    Vec::new()
}

pub(crate) fn on_submit(state: &mut AppState) -> Vec<Effect> {
    let Some(form) = state.form.as_mut() else {
        return Vec::new();
    };
    // A disabled control does not submit.
    if !form.button.enabled {
        tracker_debug!("Submit ignored while the control is disabled");
        return Vec::new();
    }

    let url = form.input.trim().to_string();
    if url.is_empty() {
        return state.notify(EMPTY_URL_MESSAGE, Severity::Warning);
    }
    if !is_valid_url(&url) {
        tracker_debug!("Rejected malformed crawl URL: {}", url);
        return state.notify(INVALID_URL_MESSAGE, Severity::Warning);
    }

    let original_label = form.button.show_loading(BUSY_LABEL);
    tracker_info!("Submitting crawl request url={}", url);
    state.submission = SubmissionPhase::Submitting {
        url: url.clone(),
        original_label,
    };
    state.mark_dirty();
    vec![Effect::PostCrawl { url }]
}

pub(crate) fn on_crawl_completed(
    state: &mut AppState,
    result: Result<ServerReply, RequestError>,
) -> Vec<Effect> {
    let (url, original_label) = match std::mem::take(&mut state.submission) {
        SubmissionPhase::Submitting {
            url,
            original_label,
        } => (url, original_label),
        SubmissionPhase::Idle => {
            tracker_warn!("Crawl response arrived with no submission in flight; ignoring");
            return Vec::new();
        }
    };

    let effects = match result {
        Ok(reply) => {
            tracker_info!("Crawl accepted url={}", url);
            let mut effects =
                state.notify(reply.message_or(CRAWL_STARTED_FALLBACK), Severity::Success);
            if let Some(form) = state.form.as_mut() {
                form.input.clear();
            }
            effects.push(Effect::ScheduleNavigation {
                target: JOBS_VIEW_PATH.to_string(),
                after: NAVIGATION_DELAY,
            });
            effects
        }
        Err(err) => {
            tracker_warn!("Crawl request failed url={}: {:?}", url, err);
            state.notify(err.user_message(CRAWL_FAILED_FALLBACK), Severity::Danger)
        }
    };

    if let Some(form) = state.form.as_mut() {
        form.button.hide_loading(original_label);
    }
    state.mark_dirty();
    effects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_round_trip_restores_label_and_enables() {
        let mut button = SubmitButton::new("Start crawling");
        let original = button.show_loading(BUSY_LABEL);
        assert!(!button.enabled);
        assert_eq!(button.label, BUSY_LABEL);

        button.hide_loading(original);
        assert_eq!(button, SubmitButton::new("Start crawling"));
    }
}
