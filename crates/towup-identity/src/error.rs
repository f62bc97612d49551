//! Error types for the identity layer.

/// Errors that can occur when interpreting identity data from the backend
/// or from persisted state.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The role value is not one of the four known account types.
    /// Fail closed: an unrecognized role never grants access anywhere.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
