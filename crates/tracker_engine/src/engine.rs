use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tokio::task::AbortHandle;
use tracker_logging::{tracker_debug, tracker_error};

use crate::{read_page, EngineEvent, RequestId, TimerId, TrackerApi};

enum EngineCommand {
    TriggerCrawl { request: RequestId, url: String },
    DeleteJob { request: RequestId, job_id: String },
    LoadPage { url: String },
    Schedule { timer: TimerId, after: Duration },
    Cancel { timer: TimerId },
    CancelAll,
}

type TimerTable = Arc<Mutex<HashMap<TimerId, AbortHandle>>>;

/// Handle to the background worker that performs requests and runs timers.
///
/// Every command completes by emitting one [`EngineEvent`], except cancelled timers.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn TrackerApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    tracker_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let timers: TimerTable = Arc::new(Mutex::new(HashMap::new()));
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &api, &timers, command, &event_tx);
            }
            cancel_all(&timers);
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// The completion event carries `request` back.
    pub fn trigger_crawl(&self, request: RequestId, url: impl Into<String>) {
        self.send(EngineCommand::TriggerCrawl {
            request,
            url: url.into(),
        });
    }

    pub fn delete_job(&self, request: RequestId, job_id: impl Into<String>) {
        self.send(EngineCommand::DeleteJob {
            request,
            job_id: job_id.into(),
        });
    }

    pub fn load_page(&self, url: impl Into<String>) {
        self.send(EngineCommand::LoadPage { url: url.into() });
    }

    /// Emits [`EngineEvent::TimerFired`] once `after` has elapsed, unless cancelled.
    pub fn schedule(&self, timer: TimerId, after: Duration) {
        self.send(EngineCommand::Schedule { timer, after });
    }

    pub fn cancel(&self, timer: TimerId) {
        self.send(EngineCommand::Cancel { timer });
    }

    pub fn cancel_all(&self) {
        self.send(EngineCommand::CancelAll);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().unwrap_or_else(PoisonError::into_inner);
        rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().unwrap_or_else(PoisonError::into_inner);
        rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            tracker_error!("Engine worker is gone; command dropped");
        }
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    api: &Arc<dyn TrackerApi>,
    timers: &TimerTable,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::TriggerCrawl { request, url } => {
            let api = api.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = api.trigger_crawl(&url).await;
                let _ = event_tx.send(EngineEvent::CrawlCompleted {
                    request,
                    url,
                    result,
                });
            });
        }
        EngineCommand::DeleteJob { request, job_id } => {
            let api = api.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = api.delete_job(&job_id).await;
                let _ = event_tx.send(EngineEvent::DeleteCompleted {
                    request,
                    job_id,
                    result,
                });
            });
        }
        EngineCommand::LoadPage { url } => {
            let api = api.clone();
            let event_tx = event_tx.clone();
            runtime.spawn(async move {
                let result = api
                    .fetch_page(&url)
                    .await
                    .map(|html| read_page(&html, &url));
                let _ = event_tx.send(EngineEvent::PageLoaded { url, result });
            });
        }
        EngineCommand::Schedule { timer, after } => {
            let event_tx = event_tx.clone();
            let table = timers.clone();
            // Hold the table while spawning so the task cannot finish before it is registered.
            let mut guard = timers.lock().unwrap_or_else(PoisonError::into_inner);
            let handle = runtime.spawn(async move {
                tokio::time::sleep(after).await;
                table
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .remove(&timer);
                let _ = event_tx.send(EngineEvent::TimerFired(timer));
            });
            if let Some(previous) = guard.insert(timer, handle.abort_handle()) {
                previous.abort();
            }
        }
        EngineCommand::Cancel { timer } => {
            let removed = timers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&timer);
            if let Some(handle) = removed {
                tracker_debug!("Cancelled timer {}", timer);
                handle.abort();
            }
        }
        EngineCommand::CancelAll => cancel_all(timers),
    }
}

fn cancel_all(timers: &TimerTable) {
    let mut guard = timers.lock().unwrap_or_else(PoisonError::into_inner);
    for (_, handle) in guard.drain() {
        handle.abort();
    }
}
