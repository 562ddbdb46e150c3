//! Digest engine: IO behind the effects emitted by `digest_core`.
mod client;
mod clipboard;
mod engine;
mod history;
mod persist;
mod storage;
mod types;

pub use client::{
    ReqwestSummaryClient, SummaryClient, SummarySettings, DEFAULT_API_HOST, DEFAULT_ENDPOINT,
};
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, Osc52Clipboard};
pub use engine::{EngineError, EngineHandle};
pub use history::{HistoryError, HistoryStore, StoredArticle, HISTORY_KEY};
pub use persist::{ensure_data_dir, PersistError, SlotWriter};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use types::{EngineEvent, FailureKind, FetchError, RequestId};
