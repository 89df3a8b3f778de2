use std::sync::Once;

use tracker_core::{
    update, AlertToken, AppState, Effect, FixedAnswer, Msg, NotificationSlot, PageSnapshot,
    Severity, ALERT_LIFETIME,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tracker_logging::initialize_for_tests);
}

fn page(has_container: bool) -> PageSnapshot {
    PageSnapshot {
        url: "http://127.0.0.1:8000/jobs".to_string(),
        has_container,
        ..PageSnapshot::default()
    }
}

#[test]
fn show_schedules_expiry_for_new_notification() {
    init_logging();
    let mut slot = NotificationSlot::new(true);
    let effects = slot.show("Saved", Severity::Success);

    assert_eq!(
        effects,
        vec![Effect::ScheduleAlertExpiry {
            token: AlertToken(1),
            after: ALERT_LIFETIME,
        }]
    );
    let current = slot.current().expect("visible");
    assert_eq!(current.message, "Saved");
    assert_eq!(current.severity, Severity::Success);
}

#[test]
fn second_notification_evicts_the_first_before_insertion() {
    init_logging();
    let mut slot = NotificationSlot::new(true);
    slot.show("first", Severity::Info);
    let effects = slot.show("second", Severity::Danger);

    assert_eq!(
        effects,
        vec![
            Effect::CancelAlertExpiry {
                token: AlertToken(1)
            },
            Effect::ScheduleAlertExpiry {
                token: AlertToken(2),
                after: ALERT_LIFETIME,
            },
        ]
    );
    assert_eq!(slot.current().map(|n| n.message.as_str()), Some("second"));
}

#[test]
fn stale_expiry_does_not_remove_the_replacement() {
    init_logging();
    let mut slot = NotificationSlot::new(true);
    slot.show("first", Severity::Info);
    slot.show("second", Severity::Info);

    assert!(!slot.expire(AlertToken(1)));
    assert!(slot.current().is_some());
    assert!(slot.expire(AlertToken(2)));
    assert!(slot.current().is_none());
    // Removal is idempotent.
    assert!(!slot.expire(AlertToken(2)));
}

#[test]
fn missing_container_makes_show_a_silent_no_op() {
    init_logging();
    let mut slot = NotificationSlot::new(false);
    let effects = slot.show("nowhere to go", Severity::Warning);

    assert!(effects.is_empty());
    assert!(slot.current().is_none());
}

#[test]
fn dismissal_cancels_pending_expiry() {
    init_logging();
    let mut slot = NotificationSlot::new(true);
    slot.show("bye", Severity::Info);

    assert_eq!(
        slot.dismiss(),
        vec![Effect::CancelAlertExpiry {
            token: AlertToken(1)
        }]
    );
    assert!(slot.dismiss().is_empty());
    assert!(!slot.expire(AlertToken(1)));
}

#[test]
fn expiry_and_dismissal_through_update() {
    init_logging();
    let gate = FixedAnswer(true);
    let (state, _) = update(AppState::new(), Msg::PageLoaded(page(true)), &gate);
    let (state, _) = update(state, Msg::UrlFormSubmitted, &gate);
    // No form on this page: nothing shown.
    assert!(state.view().alert.is_none());

    let (state, _) = update(
        state,
        Msg::NavigationFailed {
            target: "/jobs?page=9".to_string(),
            reason: "connection refused".to_string(),
        },
        &gate,
    );
    let token = state.alerts().current().expect("visible").token;
    assert_eq!(
        state.view().alert.map(|alert| alert.severity),
        Some(Severity::Danger)
    );

    let (state, _) = update(state, Msg::AlertExpired { token }, &gate);
    assert!(state.view().alert.is_none());

    let (state, _) = update(
        state,
        Msg::NavigationFailed {
            target: "/jobs".to_string(),
            reason: "timeout".to_string(),
        },
        &gate,
    );
    let (state, effects) = update(state, Msg::AlertDismissed, &gate);
    assert!(state.view().alert.is_none());
    assert_eq!(effects.len(), 1);
}

#[test]
fn page_load_clears_the_slot() {
    init_logging();
    let gate = FixedAnswer(true);
    let (state, _) = update(AppState::new(), Msg::PageLoaded(page(true)), &gate);
    let (state, _) = update(
        state,
        Msg::NavigationFailed {
            target: "/jobs".to_string(),
            reason: "timeout".to_string(),
        },
        &gate,
    );
    let old_token = state.alerts().current().expect("visible").token;

    let (state, _) = update(state, Msg::PageLoaded(page(true)), &gate);
    assert!(state.view().alert.is_none());

    let (state, _) = update(
        state,
        Msg::NavigationFailed {
            target: "/jobs".to_string(),
            reason: "timeout".to_string(),
        },
        &gate,
    );
    let (state, _) = update(state, Msg::AlertExpired { token: old_token }, &gate);
    assert!(state.view().alert.is_some());
}
