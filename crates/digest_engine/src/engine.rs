use std::io;
use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use digest_logging::{digest_debug, digest_info};
use thiserror::Error;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::client::{ReqwestSummaryClient, SummaryClient, SummarySettings};
use crate::{EngineEvent, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum EngineCommand {
    FetchSummary { request_id: RequestId, url: String },
    ScheduleCopyReset { generation: u64, delay: Duration },
}

/// Runs summary requests and feedback timers on a background tokio runtime.
///
/// Every task is tied to one cancellation token; [`EngineHandle::shutdown`]
/// (or dropping the handle) cancels it, so late results and stale timers
/// never reach the event queue.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: SummarySettings) -> Result<Self, EngineError> {
        Self::with_client(Arc::new(ReqwestSummaryClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn SummaryClient>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();

        let root = cancel.clone();
        thread::spawn(move || {
            run_commands(runtime, client, cmd_rx, event_tx, root);
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
            cancel,
        })
    }

    pub fn fetch_summary(&self, request_id: RequestId, url: impl Into<String>) {
        self.send(EngineCommand::FetchSummary {
            request_id,
            url: url.into(),
        });
    }

    pub fn schedule_copy_reset(&self, generation: u64, delay: Duration) {
        self.send(EngineCommand::ScheduleCopyReset { generation, delay });
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(timeout)
            .ok()
    }

    /// Cancels in-flight requests and pending timers.
    pub fn shutdown(&self) {
        if !self.cancel.is_cancelled() {
            digest_info!("Engine shutting down");
            self.cancel.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn send(&self, command: EngineCommand) {
        if self.cancel.is_cancelled() {
            return;
        }
        let _ = self.cmd_tx.send(command);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_commands(
    runtime: Runtime,
    client: Arc<dyn SummaryClient>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    root: CancellationToken,
) {
    while let Ok(command) = cmd_rx.recv() {
        if root.is_cancelled() {
            break;
        }
        let token = root.child_token();
        let event_tx = event_tx.clone();
        match command {
            EngineCommand::FetchSummary { request_id, url } => {
                let client = client.clone();
                runtime.spawn(async move {
                    let result = tokio::select! {
                        _ = token.cancelled() => None,
                        result = client.fetch_summary(&url) => Some(result),
                    };
                    match result {
                        Some(result) => {
                            let _ = event_tx.send(EngineEvent::SummaryCompleted {
                                request_id,
                                url,
                                result,
                            });
                        }
                        None => digest_debug!("Request {} cancelled", request_id),
                    }
                });
            }
            EngineCommand::ScheduleCopyReset { generation, delay } => {
                runtime.spawn(async move {
                    let elapsed = tokio::select! {
                        _ = token.cancelled() => false,
                        _ = tokio::time::sleep(delay) => true,
                    };
                    if elapsed {
                        let _ = event_tx.send(EngineEvent::CopyResetElapsed { generation });
                    }
                });
            }
        }
    }
    runtime.shutdown_background();
}
