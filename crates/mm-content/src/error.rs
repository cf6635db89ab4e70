//! Error types for content loading and validation.

/// Alias for `Result<T, ContentError>`.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur when loading or validating trainer content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// The content file is not valid JSON for the expected shape.
    #[error("content parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two patterns in the catalog share an id.
    #[error("duplicate pattern id: \"{0}\"")]
    DuplicatePattern(String),

    /// The requested pattern id does not exist in the catalog.
    #[error("pattern not found: \"{0}\"")]
    PatternNotFound(String),

    /// The catalog failed structural validation.
    #[error("invalid content: {0}")]
    Validation(String),
}
