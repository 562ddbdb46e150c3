use crate::{Article, RequestError, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User submitted the current URL input for summarizing.
    UrlSubmitted,
    /// Restore the history list read from persistent storage at startup.
    HistoryLoaded(Vec<Article>),
    /// Summary client finished a request.
    SummaryFetched {
        request_id: RequestId,
        url: String,
        result: Result<String, RequestError>,
    },
    /// User picked an entry from the history list (0-based).
    HistorySelected { index: usize },
    /// User asked to copy the URL of a history entry (0-based).
    CopyClicked { index: usize },
    /// The copy-feedback timer scheduled for `generation` fired.
    CopyFeedbackExpired { generation: u64 },
}
