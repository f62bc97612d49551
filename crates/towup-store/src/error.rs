//! Error types for the storage layer.

/// Errors that can occur reading, writing, or validating the persisted
/// session record.
///
/// Callers treat `Malformed` and `Incomplete` identically (discard the
/// record and fail closed); the distinction exists so logs can say *what*
/// was wrong without surfacing it to the user.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The storage backend could not be read or written (quota exceeded,
    /// storage disabled, file system error).
    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document is not valid JSON, or a field has the wrong
    /// shape (e.g. an unparseable expiry or an unknown role).
    #[error("stored session is malformed: {0}")]
    Malformed(String),

    /// The stored document has a token but is missing one of the other
    /// required fields. The field name is for the log, not the user.
    #[error("stored session is missing `{0}`")]
    Incomplete(&'static str),

    /// The record could not be serialized for writing.
    #[error("could not encode session record: {0}")]
    Encode(#[from] serde_json::Error),
}
