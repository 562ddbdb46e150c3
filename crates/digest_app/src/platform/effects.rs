use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use digest_core::{Effect, Msg, RequestError};
use digest_engine::{Clipboard, EngineEvent, EngineHandle, HistoryStore, KeyValueStorage};
use digest_logging::{digest_info, digest_warn};

use super::persistence;

/// Executes core effects against the engine, the history store and the clipboard.
pub struct EffectRunner<S> {
    engine: Arc<EngineHandle>,
    history: HistoryStore<S>,
    clipboard: Arc<dyn Clipboard>,
}

impl<S: KeyValueStorage> EffectRunner<S> {
    pub fn new(
        engine: Arc<EngineHandle>,
        history: HistoryStore<S>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        Self {
            engine,
            history,
            clipboard,
        }
    }

    pub fn history(&self) -> &HistoryStore<S> {
        &self.history
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchSummary { request_id, url } => {
                    digest_info!("FetchSummary request_id={} url={}", request_id, url);
                    self.engine.fetch_summary(request_id, url);
                }
                Effect::PersistHistory { articles } => {
                    persistence::save_history(&self.history, &articles);
                }
                Effect::CopyToClipboard { url } => {
                    if let Err(err) = self.clipboard.write_text(&url) {
                        digest_warn!("Copy of {} failed: {}", url, err);
                    }
                }
                Effect::ScheduleCopyReset { generation, delay } => {
                    self.engine.schedule_copy_reset(generation, delay);
                }
            }
        }
    }
}

/// Forwards engine events to the app inbox until the engine shuts down or
/// the inbox closes.
pub fn spawn_event_forwarder<T: Send + 'static>(
    engine: Arc<EngineHandle>,
    tx: mpsc::Sender<T>,
    wrap: fn(Msg) -> T,
) {
    thread::spawn(move || {
        while !engine.is_shut_down() {
            let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                continue;
            };
            if tx.send(wrap(map_event(event))).is_err() {
                break;
            }
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SummaryCompleted {
            request_id,
            url,
            result,
        } => {
            let result = result.map_err(|err| {
                digest_warn!("Request {} for {} failed: {}", request_id, url, err);
                RequestError::new(err.message)
            });
            Msg::SummaryFetched {
                request_id,
                url,
                result,
            }
        }
        EngineEvent::CopyResetElapsed { generation } => Msg::CopyFeedbackExpired { generation },
    }
}
