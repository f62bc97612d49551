//! Unified error type for the TowUp client core.

use towup_identity::IdentityError;
use towup_store::StoreError;

use crate::api::ApiError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `towup` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TowupError {
    /// An identity-level error (unknown role).
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A storage-level error (i/o, malformed or incomplete record).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A backend API error (transport failure or non-success status).
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_identity_error() {
        let err = IdentityError::UnknownRole("DRIVER".into());
        let towup_err: TowupError = err.into();
        assert!(matches!(towup_err, TowupError::Identity(_)));
        assert!(towup_err.to_string().contains("DRIVER"));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Incomplete("expiresAt");
        let towup_err: TowupError = err.into();
        assert!(matches!(towup_err, TowupError::Store(_)));
        assert!(towup_err.to_string().contains("expiresAt"));
    }

    #[test]
    fn test_from_api_error() {
        let err = ApiError::Status {
            status: 403,
            message: "account not yet approved".into(),
        };
        let towup_err: TowupError = err.into();
        assert!(matches!(towup_err, TowupError::Api(_)));
        assert!(towup_err.to_string().contains("account not yet approved"));
    }
}
