/// Error types for the machine translation subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// A language code is empty or malformed
    InvalidLanguage(String),
    /// Transport-level failure talking to the provider
    Network(String),
    /// The provider answered, but the translation failed or the response
    /// could not be understood
    Translation(String),
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::InvalidLanguage(msg) => write!(f, "Invalid language: {}", msg),
            MtError::Network(msg) => write!(f, "Network error: {}", msg),
            MtError::Translation(msg) => write!(f, "Translation error: {}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::Network(err.to_string())
    }
}

/// Result type for MT operations
pub type MtResult<T> = Result<T, MtError>;
