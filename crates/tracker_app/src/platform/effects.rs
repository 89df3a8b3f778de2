use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracker_core::{
    AlertToken, ClickTarget, Effect, FormSnapshot, JobFields, Msg, PageLink, PageSnapshot,
    RequestError, RowSnapshot, ServerReply,
};
use tracker_engine::{
    ApiFailure, ApiMessage, EngineEvent, EngineHandle, ParsedPage, RequestId, TimerId,
};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};
use url::Url;

/// Book-keeping shared between the runner and the event thread.
///
/// `page` counts page loads. Requests remember the page they were issued
/// from, and their completions are dropped once another page has loaded.
#[derive(Default)]
struct Ledger {
    page: u64,
    next_timer: TimerId,
    timers: HashMap<TimerId, Msg>,
    alert_timers: HashMap<AlertToken, TimerId>,
    next_request: RequestId,
    requests: HashMap<RequestId, u64>,
}

impl Ledger {
    fn add_timer(&mut self, msg: Msg) -> TimerId {
        self.next_timer += 1;
        self.timers.insert(self.next_timer, msg);
        self.next_timer
    }

    fn take_timer(&mut self, timer: TimerId) -> Option<Msg> {
        self.alert_timers.retain(|_, id| *id != timer);
        self.timers.remove(&timer)
    }

    fn issue_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.requests.insert(self.next_request, self.page);
        self.next_request
    }

    /// Consumes `request`; true when it was issued from the displayed page.
    fn request_is_current(&mut self, request: RequestId) -> bool {
        self.requests.remove(&request) == Some(self.page)
    }

    /// A new page replaced the displayed one. Its timers die with it.
    fn page_replaced(&mut self) {
        self.page += 1;
        self.timers.clear();
        self.alert_timers.clear();
    }
}

type SharedLedger = Arc<Mutex<Ledger>>;

fn lock(ledger: &SharedLedger) -> std::sync::MutexGuard<'_, Ledger> {
    ledger.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct EffectRunner {
    engine: EngineHandle,
    base_url: Url,
    ledger: SharedLedger,
    msg_tx: mpsc::Sender<Msg>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, base_url: Url, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self {
            engine,
            base_url,
            ledger: SharedLedger::default(),
            msg_tx,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PostCrawl { url } => {
                    tracker_info!("PostCrawl url={}", url);
                    let request = lock(&self.ledger).issue_request();
                    self.engine.trigger_crawl(request, url);
                }
                Effect::DeleteJob { job_id } => {
                    tracker_info!("DeleteJob job_id={}", job_id);
                    let request = lock(&self.ledger).issue_request();
                    self.engine.delete_job(request, job_id);
                }
                Effect::ScheduleAlertExpiry { token, after } => {
                    let mut ledger = lock(&self.ledger);
                    let timer = ledger.add_timer(Msg::AlertExpired { token });
                    ledger.alert_timers.insert(token, timer);
                    self.engine.schedule(timer, after);
                }
                Effect::CancelAlertExpiry { token } => {
                    let mut ledger = lock(&self.ledger);
                    if let Some(timer) = ledger.alert_timers.remove(&token) {
                        ledger.timers.remove(&timer);
                        self.engine.cancel(timer);
                    }
                }
                Effect::ScheduleNavigation { target, after } => {
                    tracker_debug!("Navigation to {} in {:?}", target, after);
                    let timer = lock(&self.ledger).add_timer(Msg::NavigationDue { target });
                    self.engine.schedule(timer, after);
                }
                Effect::Navigate { target } => self.load(target),
                Effect::Reload { url } => self.load(url),
            }
        }
    }

    fn load(&self, target: String) {
        let url = match self.base_url.join(&target) {
            Ok(url) => url,
            Err(err) => {
                tracker_warn!("Cannot resolve {}: {}", target, err);
                let _ = self.msg_tx.send(Msg::NavigationFailed {
                    target,
                    reason: err.to_string(),
                });
                return;
            }
        };
        // The displayed page stays live until the new one arrives; a failed
        // load leaves its requests and timers running.
        tracker_info!("Navigate {}", url);
        self.engine.load_page(url.to_string());
    }

    fn spawn_event_loop(&self) {
        let engine = self.engine.clone();
        let ledger = self.ledger.clone();
        let msg_tx = self.msg_tx.clone();
        thread::spawn(move || loop {
            let Some(event) = engine.try_recv() else {
                thread::sleep(Duration::from_millis(20));
                continue;
            };
            let Some(msg) = map_event(event, &ledger) else {
                continue;
            };
            if matches!(msg, Msg::PageLoaded(_)) {
                engine.cancel_all();
            }
            if msg_tx.send(msg).is_err() {
                break;
            }
        });
    }
}

fn map_event(event: EngineEvent, ledger: &SharedLedger) -> Option<Msg> {
    match event {
        EngineEvent::CrawlCompleted {
            request,
            url,
            result,
        } => {
            if !lock(ledger).request_is_current(request) {
                tracker_debug!("Dropping crawl response for {} from a previous page", url);
                return None;
            }
            Some(Msg::CrawlCompleted(map_result(result)))
        }
        EngineEvent::DeleteCompleted {
            request,
            job_id,
            result,
        } => {
            if !lock(ledger).request_is_current(request) {
                tracker_debug!("Dropping delete response for {} from a previous page", job_id);
                return None;
            }
            Some(Msg::DeleteCompleted {
                job_id,
                result: map_result(result),
            })
        }
        EngineEvent::PageLoaded { url, result } => match result {
            Ok(page) => {
                lock(ledger).page_replaced();
                Some(Msg::PageLoaded(map_page(page)))
            }
            Err(failure) => {
                tracker_warn!("Page load {} failed: {}", url, failure);
                Some(Msg::NavigationFailed {
                    target: url,
                    reason: failure.to_string(),
                })
            }
        },
        EngineEvent::TimerFired(timer) => {
            let msg = lock(ledger).take_timer(timer);
            if msg.is_none() {
                tracker_debug!("Timer {} fired after it was cancelled", timer);
            }
            msg
        }
    }
}

fn map_result(result: Result<ApiMessage, ApiFailure>) -> Result<ServerReply, RequestError> {
    match result {
        Ok(body) => Ok(ServerReply {
            message: body.message,
        }),
        Err(ApiFailure::Rejected { status, detail }) => {
            Err(RequestError::Rejected { status, detail })
        }
        Err(other) => Err(RequestError::Transport {
            reason: other.to_string(),
        }),
    }
}

fn map_page(page: ParsedPage) -> PageSnapshot {
    PageSnapshot {
        url: page.url,
        form: page.form.map(|form| FormSnapshot {
            input_value: form.input_value,
            button_label: form.button_label,
        }),
        has_container: page.has_container,
        rows: page
            .rows
            .into_iter()
            .map(|row| RowSnapshot {
                table_row: row.table_row,
                job_ids: row.job_ids,
                // Only job items take part in search.
                fields: row
                    .job_item
                    .then(|| JobFields::new(row.title, row.company, row.location)),
                posted: row.posted,
            })
            .collect(),
        delete_controls: page
            .delete_controls
            .into_iter()
            .map(|control| ClickTarget {
                classes: control.classes,
                data: control.data,
            })
            .collect(),
        search_value: page.search_value,
        has_refresh: page.has_refresh,
        pagination: page
            .pagination
            .into_iter()
            .map(|link| PageLink {
                label: link.label,
                href: link.href,
            })
            .collect(),
    }
}
