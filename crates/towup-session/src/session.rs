//! Session types: the data that represents an authenticated browser context.

use std::time::Duration;

use towup_identity::{EntityId, Role};
use towup_store::SessionRecord;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// An established session.
///
/// All four fields are mandatory by construction — there is no way to hold
/// a token without its expiry, id, and role. The manager stores
/// `Option<Session>`, so the only two representable states are "fully
/// authenticated" and "anonymous"; the partial states the old cookie
/// layout allowed simply do not exist here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer credential, attached to outgoing requests as
    /// `Authorization: Bearer <token>`.
    pub token: String,
    /// Absolute expiry instant, milliseconds since the Unix epoch. The
    /// token must be treated as invalid from this instant on.
    pub expires_at_ms: u64,
    /// Identifier of the authenticated principal.
    pub entity_id: EntityId,
    /// Account type of the authenticated principal.
    pub role: Role,
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            token: session.token.clone(),
            expires_at: session.expires_at_ms,
            entity_id: session.entity_id.clone(),
            role: session.role,
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Self {
            token: record.token,
            expires_at_ms: record.expires_at,
            entity_id: record.entity_id,
            role: record.role,
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Routes that must stay reachable for an anonymous or expired visitor.
///
/// An expiry detected while the user is on one of these still clears the
/// session state, but skips the redirect — kicking someone off the signup
/// page to the login page would make the public flow unreachable.
pub const PUBLIC_ROUTES: [&str; 7] = [
    "/",
    "/login",
    "/fleetowner/signup",
    "/repocompany/signup",
    "/towtruckop/signup",
    "/signup-confirmation",
    "/verify-email",
];

/// Configuration for session behavior.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Period of the recurring liveness sweep that re-validates the expiry
    /// instant against the live clock. The sweep exists because a one-shot
    /// timer armed before a laptop suspends is unreliable; the sweep is
    /// the correctness backstop.
    ///
    /// Default: 60 seconds.
    pub sweep_interval: Duration,

    /// Where a terminated or expired session lands.
    ///
    /// Default: `/login`.
    pub sign_in_route: String,

    /// Routes exempt from the expiry redirect. See [`PUBLIC_ROUTES`].
    pub public_routes: Vec<String>,
}

impl SessionConfig {
    /// Returns `true` if `path` is reachable by an anonymous visitor.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_routes.iter().any(|route| route == path)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(60),
            sign_in_route: "/login".to_string(),
            public_routes: PUBLIC_ROUTES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
