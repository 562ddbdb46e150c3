//! Digest core: pure state machine and view-model helpers.
mod article;
mod effect;
mod error;
mod msg;
mod state;
mod update;
mod view_model;

pub use article::{Article, RequestId};
pub use effect::Effect;
pub use error::{RequestError, ValidationError};
pub use msg::Msg;
pub use state::{AppState, CopyFeedback, FetchStatus, COPY_FEEDBACK_DELAY};
pub use update::{update, validate_url};
pub use view_model::{AppViewModel, HistoryRowView, ResultPanel, ERROR_HEADING};
