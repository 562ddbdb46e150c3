use url::Url;

use crate::{AppState, Article, Effect, Msg, RequestError, ValidationError, COPY_FEEDBACK_DELAY};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::UrlSubmitted => {
            // One request in flight at a time; a second submit is dropped, not queued.
            if state.is_fetching() {
                return (state, Vec::new());
            }
            match validate_url(state.input()) {
                Ok(url) => {
                    let request_id = state.begin_fetch(url.clone());
                    vec![Effect::FetchSummary { request_id, url }]
                }
                Err(err) => {
                    state.set_validation(err);
                    Vec::new()
                }
            }
        }
        Msg::HistoryLoaded(articles) => {
            state.restore_history(articles);
            Vec::new()
        }
        Msg::SummaryFetched {
            request_id,
            url,
            result,
        } => {
            if !state.is_pending(request_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(summary) if !summary.is_empty() => {
                    state.complete_fetch(Article::new(url, summary));
                    vec![Effect::PersistHistory {
                        articles: state.history().to_vec(),
                    }]
                }
                Ok(_) => {
                    state.fail_fetch(RequestError::missing_summary());
                    Vec::new()
                }
                Err(err) => {
                    state.fail_fetch(err);
                    Vec::new()
                }
            }
        }
        Msg::HistorySelected { index } => {
            state.select_history(index);
            Vec::new()
        }
        Msg::CopyClicked { index } => match state.begin_copy(index) {
            Some((url, generation)) => vec![
                Effect::CopyToClipboard { url },
                Effect::ScheduleCopyReset {
                    generation,
                    delay: COPY_FEEDBACK_DELAY,
                },
            ],
            None => Vec::new(),
        },
        Msg::CopyFeedbackExpired { generation } => {
            state.expire_copy(generation);
            Vec::new()
        }
    };

    (state, effects)
}

/// Checks that `raw` is a non-empty absolute http(s) URL and returns it trimmed.
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    let parsed = Url::parse(trimmed).map_err(|err| ValidationError::Invalid {
        reason: err.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ValidationError::UnsupportedScheme {
            scheme: other.to_string(),
        }),
    }
}
