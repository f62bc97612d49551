//! # TowUp client core
//!
//! Session, routing, and backend-API plumbing for the TowUp
//! vehicle-recovery/fleet-dispatch client. The presentation layer (pages,
//! forms) lives elsewhere; this workspace owns the one piece with real
//! lifecycle rules — the authenticated session — and the collaborators
//! that consume it.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use towup::prelude::*;
//!
//! # async fn run() {
//! let store = Arc::new(FileStore::new("towup-session.json"));
//! let manager = SessionManager::with_defaults(store);
//!
//! // Rehydrate a surviving session from a previous run.
//! manager.restore();
//!
//! let guard = RouteGuard::new(manager.clone(), RouteTable::towup());
//! let api = ApiClient::new("http://localhost:5437", manager);
//!
//! if guard.admit("/fleetowner/profile") {
//!     // render the profile...
//! }
//! # }
//! ```

mod api;
mod error;

pub use api::{ApiClient, ApiError};
pub use error::TowupError;

pub use towup_guard::{GuardDecision, RouteGuard, RoutePolicy, RouteTable};
pub use towup_identity::{EntityId, IdentityError, Role, SignInRequest, SignInResponse};
pub use towup_session::{
    Clock, ManualClock, Navigator, NoopNavigator, Notifier, SESSION_EXPIRED_NOTICE,
    Session, SessionConfig, SessionManager, SystemClock, TracingNotifier,
};
pub use towup_store::{CredentialStore, FileStore, MemoryStore, SessionRecord, StoreError};

/// The most commonly used types, for a single glob import.
pub mod prelude {
    pub use crate::{
        ApiClient, ApiError, CredentialStore, EntityId, FileStore, GuardDecision,
        MemoryStore, Role, RouteGuard, RoutePolicy, RouteTable, Session,
        SessionConfig, SessionManager, SignInResponse, TowupError,
    };
}

/// Initializes a tracing subscriber honoring `RUST_LOG`, defaulting to
/// `info`. Call once at startup.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
