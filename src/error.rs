/// Error types for Issue Link Copier
use thiserror::Error;

/// The page title did not follow the `<name> · <index> · <repo>` layout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataExtractionError {
    #[error("title '{0}' has no trailing index and repository segments")]
    MissingSegments(String),
    #[error("index segment '{0}' contains no digits")]
    NoIndexDigits(String),
    #[error("title '{0}' has an empty repository segment")]
    EmptyRepoName(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("storage unavailable for key '{key}': {reason}")]
    Unavailable { key: String, reason: String },
    #[error("failed to encode value for key '{key}': {reason}")]
    Encode { key: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("active tab unavailable: {0}")]
pub struct HostPageError(pub String);

/// Failure of a single copy action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    #[error("no entry with id '{0}'")]
    UnknownEntry(String),
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}
