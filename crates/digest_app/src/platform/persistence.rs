use digest_core::Article;
use digest_engine::{HistoryStore, KeyValueStorage, StoredArticle};
use digest_logging::digest_error;

pub(crate) fn load_history<S: KeyValueStorage>(store: &HistoryStore<S>) -> Vec<Article> {
    store
        .load()
        .into_iter()
        .map(|stored| Article::new(stored.url, stored.summary))
        .collect()
}

pub(crate) fn save_history<S: KeyValueStorage>(store: &HistoryStore<S>, articles: &[Article]) {
    let stored: Vec<StoredArticle> = articles
        .iter()
        .map(|article| StoredArticle {
            url: article.url.clone(),
            summary: article.summary.clone(),
        })
        .collect();

    if let Err(err) = store.save(&stored) {
        digest_error!("Failed to persist {} history entries: {}", stored.len(), err);
    }
}
