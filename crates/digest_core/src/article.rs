pub type RequestId = u64;

/// A URL paired with its fetched summary text.
///
/// History entries are snapshots: once an `Article` lands in the history list
/// it is never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Article {
    pub url: String,
    pub summary: String,
}

impl Article {
    pub fn new(url: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            summary: summary.into(),
        }
    }

    pub fn has_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}
