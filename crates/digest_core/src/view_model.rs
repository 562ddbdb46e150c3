/// Heading shown above the server-provided detail of a failed request.
pub const ERROR_HEADING: &str = "Well, that wasn't supposed to happen...";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub history: Vec<HistoryRowView>,
    pub panel: ResultPanel,
    /// Why the last submit was refused, if it was.
    pub validation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub index: usize,
    pub url: String,
    /// The copy-feedback marker is on this row.
    pub copied: bool,
}

/// The result area has exactly one of these visual states.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Empty,
    Loading {
        url: String,
    },
    Error {
        heading: String,
        detail: String,
    },
    Summary {
        url: String,
        summary: String,
    },
}
