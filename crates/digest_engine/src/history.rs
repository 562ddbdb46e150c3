use digest_logging::{digest_info, digest_warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{KeyValueStorage, StorageError};

/// Storage slot holding the history list.
pub const HISTORY_KEY: &str = "articles";

/// One history entry as written to storage: `{"url": ..., "summary": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredArticle {
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("malformed history: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to serialize history: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Reads and writes the ordered history list through a key-value slot.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the history, surfacing unreadable or malformed content.
    pub fn try_load(&self) -> Result<Vec<StoredArticle>, HistoryError> {
        match self.storage.get_item(HISTORY_KEY)? {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(&text).map_err(HistoryError::Malformed),
        }
    }

    /// Loads the history; any failure yields an empty list.
    pub fn load(&self) -> Vec<StoredArticle> {
        match self.try_load() {
            Ok(articles) => {
                digest_info!("Loaded {} history entries", articles.len());
                articles
            }
            Err(err) => {
                digest_warn!("Discarding persisted history: {}", err);
                Vec::new()
            }
        }
    }

    /// Overwrites the slot with `articles` in a single write.
    pub fn save(&self, articles: &[StoredArticle]) -> Result<(), HistoryError> {
        let content = serde_json::to_string(articles).map_err(HistoryError::Serialize)?;
        self.storage.set_item(HISTORY_KEY, &content)?;
        Ok(())
    }
}
