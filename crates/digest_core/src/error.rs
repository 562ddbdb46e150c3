use thiserror::Error;

/// A failed summary request, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RequestError {
    pub message: String,
}

impl RequestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn missing_summary() -> Self {
        Self::new("The response did not contain a summary.")
    }
}

/// Input rejected before it reaches the summary client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL.")]
    Empty,
    #[error("Please enter a valid URL: {reason}")]
    Invalid { reason: String },
    #[error("Only http and https URLs can be summarized (got `{scheme}`).")]
    UnsupportedScheme { scheme: String },
}
