use std::time::Duration;

use crate::view_model::{AppViewModel, HistoryRowView, ResultPanel, ERROR_HEADING};
use crate::{Article, RequestError, RequestId, ValidationError};

/// How long the "copied" marker stays on a history row.
pub const COPY_FEEDBACK_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Fetching {
        request_id: RequestId,
        url: String,
    },
    Success,
    Error(RequestError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    pub url: String,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    /// Contents of the input box. Editing it never touches `article`.
    input: String,
    /// Article shown in the summary panel.
    article: Article,
    /// Most recent first.
    history: Vec<Article>,
    status: FetchStatus,
    copied: Option<CopyFeedback>,
    validation: Option<ValidationError>,
    next_request_id: RequestId,
    next_copy_generation: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn history(&self) -> &[Article] {
        &self.history
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn copied(&self) -> Option<&CopyFeedback> {
        self.copied.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        self.validation.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        matches!(self.status, FetchStatus::Fetching { .. })
    }

    pub fn view(&self) -> AppViewModel {
        let copied_url = self.copied.as_ref().map(|feedback| feedback.url.as_str());
        let history = self
            .history
            .iter()
            .enumerate()
            .map(|(index, article)| HistoryRowView {
                index,
                url: article.url.clone(),
                copied: copied_url == Some(article.url.as_str()),
            })
            .collect();

        let panel = match &self.status {
            FetchStatus::Fetching { url, .. } => ResultPanel::Loading { url: url.clone() },
            FetchStatus::Error(err) => ResultPanel::Error {
                heading: ERROR_HEADING.to_string(),
                detail: err.message.clone(),
            },
            FetchStatus::Idle | FetchStatus::Success if self.article.has_summary() => {
                ResultPanel::Summary {
                    url: self.article.url.clone(),
                    summary: self.article.summary.clone(),
                }
            }
            FetchStatus::Idle | FetchStatus::Success => ResultPanel::Empty,
        };

        AppViewModel {
            input: self.input.clone(),
            history,
            panel,
            validation: self.validation.as_ref().map(ToString::to_string),
        }
    }

    /// Returns whether a render is due and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, text: String) {
        self.input = text;
        self.validation = None;
        self.mark_dirty();
    }

    pub(crate) fn set_validation(&mut self, err: ValidationError) {
        self.validation = Some(err);
        self.mark_dirty();
    }

    pub(crate) fn restore_history(&mut self, articles: Vec<Article>) {
        self.history = articles;
        self.mark_dirty();
    }

    pub(crate) fn begin_fetch(&mut self, url: String) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.status = FetchStatus::Fetching { request_id, url };
        self.validation = None;
        self.mark_dirty();
        request_id
    }

    pub(crate) fn is_pending(&self, request_id: RequestId) -> bool {
        matches!(
            self.status,
            FetchStatus::Fetching { request_id: pending, .. } if pending == request_id
        )
    }

    pub(crate) fn complete_fetch(&mut self, article: Article) {
        self.history.insert(0, article.clone());
        self.article = article;
        self.status = FetchStatus::Success;
        self.mark_dirty();
    }

    pub(crate) fn fail_fetch(&mut self, err: RequestError) {
        self.status = FetchStatus::Error(err);
        self.mark_dirty();
    }

    /// Shows a stored entry without a request and puts its URL back in the
    /// input box. A fetch in flight keeps its loading state and will replace
    /// the article when it lands.
    pub(crate) fn select_history(&mut self, index: usize) -> bool {
        let Some(article) = self.history.get(index).cloned() else {
            return false;
        };
        self.input.clone_from(&article.url);
        self.article = article;
        self.validation = None;
        if !self.is_fetching() {
            self.status = FetchStatus::Success;
        }
        self.mark_dirty();
        true
    }

    pub(crate) fn begin_copy(&mut self, index: usize) -> Option<(String, u64)> {
        let url = self.history.get(index)?.url.clone();
        self.next_copy_generation += 1;
        let generation = self.next_copy_generation;
        self.copied = Some(CopyFeedback {
            url: url.clone(),
            generation,
        });
        self.mark_dirty();
        Some((url, generation))
    }

    pub(crate) fn expire_copy(&mut self, generation: u64) {
        if self
            .copied
            .as_ref()
            .is_some_and(|feedback| feedback.generation == generation)
        {
            self.copied = None;
            self.mark_dirty();
        }
    }
}
