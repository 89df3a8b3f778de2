use std::cell::RefCell;
use std::sync::Once;

use tracker_core::{
    update, AppState, ClickTarget, ConfirmationGate, Effect, FixedAnswer, JobFields, Msg,
    PageSnapshot, RequestError, RowSnapshot, ServerReply, Severity, DELETE_FAILED_FALLBACK,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tracker_logging::initialize_for_tests);
}

/// Records every prompt it is shown and answers with a fixed decision.
struct RecordingGate {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl RecordingGate {
    fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl ConfirmationGate for RecordingGate {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
    }
}

fn table_row(job_id: &str, title: &str) -> RowSnapshot {
    RowSnapshot {
        table_row: true,
        job_ids: vec![job_id.to_string()],
        fields: Some(JobFields::new(title, "Acme", "Seoul")),
        posted: None,
    }
}

fn jobs_page() -> AppState {
    AppState::from_page(PageSnapshot {
        url: "http://127.0.0.1:8000/jobs".to_string(),
        has_container: true,
        rows: vec![
            table_row("41", "Frontend Engineer"),
            table_row("42", "Backend Engineer"),
            table_row("43", "Data Engineer"),
        ],
        delete_controls: vec![
            ClickTarget::delete_control("41", "Frontend Engineer"),
            ClickTarget::delete_control("42", "Backend Engineer"),
            ClickTarget::delete_control("43", "Data Engineer"),
        ],
        ..PageSnapshot::default()
    })
}

fn row_ids(state: &AppState) -> Vec<Option<String>> {
    state.view().jobs.into_iter().map(|row| row.job_id).collect()
}

fn click_delete(state: AppState, gate: &dyn ConfirmationGate) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::Clicked(ClickTarget::delete_control("42", "Backend Engineer")),
        gate,
    )
}

#[test]
fn confirmed_click_issues_one_delete_for_the_job() {
    init_logging();
    let gate = RecordingGate::new(true);
    let (_state, effects) = click_delete(jobs_page(), &gate);

    assert_eq!(
        effects,
        vec![Effect::DeleteJob {
            job_id: "42".to_string()
        }]
    );
    let prompts = gate.prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Backend Engineer\""));
}

#[test]
fn declined_confirmation_changes_nothing() {
    init_logging();
    let before = jobs_page();
    let (mut next, effects) = click_delete(before.clone(), &RecordingGate::new(false));

    assert!(effects.is_empty());
    assert_eq!(next.view().jobs, before.view().jobs);
    assert!(next.view().alert.is_none());
    // The page was dirty from loading; the declined click adds nothing else.
    assert!(next.consume_dirty());
    let (mut next, _) = click_delete(next, &RecordingGate::new(false));
    assert!(!next.consume_dirty());
}

#[test]
fn success_removes_only_the_tagged_row() {
    init_logging();
    let (state, _) = click_delete(jobs_page(), &FixedAnswer(true));
    let (next, _) = update(
        state,
        Msg::DeleteCompleted {
            job_id: "42".to_string(),
            result: Ok(ServerReply::with_message("Job posting deleted successfully.")),
        },
        &FixedAnswer(true),
    );

    assert_eq!(
        row_ids(&next),
        vec![Some("41".to_string()), Some("43".to_string())]
    );
    let view = next.view();
    let alert = view.alert.expect("success shown");
    assert_eq!(alert.severity, Severity::Success);
    assert_eq!(alert.message, "Job posting deleted successfully.");
    assert!(view
        .delete_controls
        .iter()
        .all(|control| control.job_id != "42"));
}

#[test]
fn failure_keeps_the_row_and_reports_detail() {
    init_logging();
    let (state, _) = click_delete(jobs_page(), &FixedAnswer(true));
    let (next, _) = update(
        state,
        Msg::DeleteCompleted {
            job_id: "42".to_string(),
            result: Err(RequestError::Rejected {
                status: 404,
                detail: Some("Job posting not found.".to_string()),
            }),
        },
        &FixedAnswer(true),
    );

    assert_eq!(row_ids(&next).len(), 3);
    let alert = next.view().alert.expect("danger shown");
    assert_eq!(alert.severity, Severity::Danger);
    assert_eq!(alert.message, "Job posting not found.");
}

#[test]
fn failure_without_detail_uses_fallback() {
    init_logging();
    let (next, _) = update(
        jobs_page(),
        Msg::DeleteCompleted {
            job_id: "41".to_string(),
            result: Err(RequestError::Transport {
                reason: "reset by peer".to_string(),
            }),
        },
        &FixedAnswer(true),
    );

    assert_eq!(row_ids(&next).len(), 3);
    assert_eq!(
        next.view().alert.map(|alert| alert.message),
        Some(DELETE_FAILED_FALLBACK.to_string())
    );
}

#[test]
fn success_for_unknown_row_is_a_quiet_no_op() {
    init_logging();
    let (next, _) = update(
        jobs_page(),
        Msg::DeleteCompleted {
            job_id: "999".to_string(),
            result: Ok(ServerReply::with_message("deleted")),
        },
        &FixedAnswer(true),
    );

    assert_eq!(row_ids(&next).len(), 3);
    assert_eq!(
        next.view().alert.map(|alert| alert.severity),
        Some(Severity::Success)
    );
}

#[test]
fn delegated_listener_handles_controls_not_in_the_loaded_table() {
    init_logging();
    // A control rendered after load carries the same marker and attributes.
    let late = ClickTarget::new()
        .with_class("btn")
        .with_class("delete-job-btn")
        .with_data("job-id", "77")
        .with_data("job-title", "Site Reliability Engineer");
    let (_state, effects) = update(jobs_page(), Msg::Clicked(late), &FixedAnswer(true));

    assert_eq!(
        effects,
        vec![Effect::DeleteJob {
            job_id: "77".to_string()
        }]
    );
}

#[test]
fn clicks_on_other_elements_are_ignored() {
    init_logging();
    let gate = RecordingGate::new(true);
    let other = ClickTarget::new()
        .with_class("btn-primary")
        .with_data("job-id", "42");
    let (_state, effects) = update(jobs_page(), Msg::Clicked(other), &gate);

    assert!(effects.is_empty());
    assert!(gate.prompts.borrow().is_empty());
}

#[test]
fn concurrent_deletes_each_remove_their_own_row() {
    init_logging();
    let gate = FixedAnswer(true);
    let (state, first) = update(
        jobs_page(),
        Msg::Clicked(ClickTarget::delete_control("41", "Frontend Engineer")),
        &gate,
    );
    let (state, second) = update(
        state,
        Msg::Clicked(ClickTarget::delete_control("43", "Data Engineer")),
        &gate,
    );
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);

    // Responses arrive in reverse order.
    let (state, _) = update(
        state,
        Msg::DeleteCompleted {
            job_id: "43".to_string(),
            result: Ok(ServerReply::with_message("deleted 43")),
        },
        &gate,
    );
    let (state, _) = update(
        state,
        Msg::DeleteCompleted {
            job_id: "41".to_string(),
            result: Ok(ServerReply::with_message("deleted 41")),
        },
        &gate,
    );

    assert_eq!(row_ids(&state), vec![Some("42".to_string())]);
    assert_eq!(
        state.view().alert.map(|alert| alert.message),
        Some("deleted 41".to_string())
    );
}
