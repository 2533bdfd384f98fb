use thiserror::Error;

/// Everything that can go wrong while loading a page of ideas.
///
/// Cloneable so a single failure can be handed to every caller waiting on the
/// same cache key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    /// The API answered with a non-success status.
    #[error("Failed to fetch ideas: HTTP {status}")]
    FetchFailed { status: u16 },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Failed to fetch ideas: {0}")]
    Transport(String),

    /// The body was not a paginated ideas payload.
    #[error("Malformed ideas response: {0}")]
    Malformed(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for ListingError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) if !status.is_success() => ListingError::FetchFailed {
                status: status.as_u16(),
            },
            _ => ListingError::Transport(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ListingError {
    fn from(e: serde_json::Error) -> Self {
        ListingError::Malformed(e.to_string())
    }
}
