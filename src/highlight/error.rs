/// Error type for the highlight subsystem.
///
/// Validation failures carry no side effect: a rejected submission leaves the
/// store untouched. Store corruption is not represented here at all; the
/// store recovers from it internally by degrading to an empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// Submitted text is empty or whitespace-only.
    EmptyText,
    /// Submitted text does not occur verbatim in the displayed source text.
    NotInSource,
    /// The backing store could not be written.
    Store(String),
}

impl std::fmt::Display for HighlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighlightError::EmptyText => write!(f, "highlight text is empty"),
            HighlightError::NotInSource => {
                write!(f, "highlight text was not found in the displayed text")
            }
            HighlightError::Store(msg) => write!(f, "highlight store error: {}", msg),
        }
    }
}

impl std::error::Error for HighlightError {}

/// Result type for highlight operations.
pub type HighlightResult<T> = Result<T, HighlightError>;
