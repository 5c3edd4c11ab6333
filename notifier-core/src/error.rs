use thiserror::Error;

/// Every way a notifier run can fail. All variants are fatal to the run.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// A required argument or environment variable is missing or blank.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The version token or directory could not be located upstream.
    #[error("Could not discover resource URL: {0}")]
    Discovery(String),

    #[error("Unexpected response shape: {0}")]
    Schema(String),

    /// A field expected to hold numeric text did not parse.
    #[error("Malformed value for '{field}': {value:?}")]
    Format { field: &'static str, value: String },

    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

pub type Result<T, E = NotifyError> = std::result::Result<T, E>;

impl NotifyError {
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        NotifyError::Transport { url: url.into(), reason: reason.to_string() }
    }

    pub fn schema(what: &str, err: serde_json::Error) -> Self {
        NotifyError::Schema(format!("{what}: {err}"))
    }
}
