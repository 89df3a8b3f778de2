use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::{deletion, submission, AppState, ConfirmationGate, Effect, Msg, Severity};

/// Pure update function: applies a message to state and returns any effects.
///
/// `gate` answers the delete confirmation synchronously; it is the only
/// outside input consulted while a message is applied.
pub fn update(
    mut state: AppState,
    msg: Msg,
    gate: &dyn ConfirmationGate,
) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded(page) => {
            tracker_info!("Page loaded: {} ({} rows)", page.url, page.rows.len());
            let alerts = state.alerts.for_new_page(page.has_container);
            state = AppState::from_page(page);
            state.alerts = alerts;
            Vec::new()
        }
        Msg::NavigationFailed { target, reason } => {
            tracker_warn!("Navigation to {} failed: {}", target, reason);
            state.notify(format!("Could not load {target}."), Severity::Danger)
        }
        Msg::UrlInputChanged(text) => submission::on_input_changed(&mut state, text),
        Msg::UrlFormSubmitted => submission::on_submit(&mut state),
        Msg::CrawlCompleted(result) => submission::on_crawl_completed(&mut state, result),
        Msg::Clicked(target) => deletion::on_click(target, gate),
        Msg::DeleteCompleted { job_id, result } => {
            deletion::on_delete_completed(&mut state, job_id, result)
        }
        Msg::AlertDismissed => {
            let effects = state.alerts.dismiss();
            if !effects.is_empty() {
                state.mark_dirty();
            }
            effects
        }
        Msg::AlertExpired { token } => {
            if state.alerts.expire(token) {
                tracker_debug!("Notification {:?} expired", token);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NavigationDue { target } => vec![Effect::Navigate { target }],
        Msg::SearchChanged(query) => {
            if state.search.is_some() {
                let shown = state.table.apply_search(&query);
                tracker_debug!("Search {:?} shows {} of {} rows", query, shown, state.table.len());
                state.search = Some(query);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::RefreshClicked => {
            if state.has_refresh {
                vec![Effect::Reload {
                    url: state.page_url.clone(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::PageLinkClicked { index } => match state
            .pagination
            .get(index)
            .and_then(|link| link.href.clone())
        {
            Some(target) => vec![Effect::Navigate { target }],
            None => Vec::new(),
        },
    };

    (state, effects)
}
