use std::time::Duration;

use crate::{Article, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the summary client for a summary of `url`.
    FetchSummary { request_id: RequestId, url: String },
    /// Overwrite the persisted history with the full list, most recent first.
    PersistHistory { articles: Vec<Article> },
    CopyToClipboard { url: String },
    /// Deliver `Msg::CopyFeedbackExpired { generation }` after `delay`.
    ScheduleCopyReset { generation: u64, delay: Duration },
}
