//! Wire contract for the backend's sign-in exchange.
//!
//! The backend delivers everything a session needs in a single bundle —
//! token, lifetime, principal id, and role. The session layer requires all
//! four together, so the bundle is the natural input to `establish`.

use serde::{Deserialize, Serialize};

use crate::{EntityId, Role};

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful response body from `POST /auth/login`.
///
/// `expires_in` is a lifetime in **milliseconds from now**, not an absolute
/// instant — the session layer computes `expires_at = now + expires_in` at
/// the moment it establishes the session, so clock skew between client and
/// backend never shortens or extends the session.
///
/// `#[serde(rename_all = "camelCase")]` matches the backend's JSON field
/// names (`expiresIn`, `entityId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    /// Opaque bearer credential.
    pub token: String,
    /// Token lifetime in milliseconds from the moment of issue.
    pub expires_in: u64,
    /// Identifier of the authenticated principal.
    pub entity_id: EntityId,
    /// Account type of the authenticated principal.
    pub role: Role,
}

// =========================================================================
// Tests
// =========================================================================
