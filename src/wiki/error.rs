/// Error types for the content-provider subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiError {
    /// A language code is empty or malformed
    InvalidLanguage(String),
    /// Transport-level failure talking to the content API
    Network(String),
    /// The API answered with an unexpected status or payload shape
    InvalidResponse(String),
}

impl std::fmt::Display for WikiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WikiError::InvalidLanguage(msg) => write!(f, "Invalid language: {}", msg),
            WikiError::Network(msg) => write!(f, "Network error: {}", msg),
            WikiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for WikiError {}

impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        WikiError::Network(err.to_string())
    }
}

/// Result type for content-provider operations
pub type WikiResult<T> = Result<T, WikiError>;
