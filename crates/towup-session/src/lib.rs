//! Session lifecycle management for the TowUp client core.
//!
//! This crate owns the authenticated identity of the current browser
//! session: bearer token, expiry instant, principal id, and role. It is
//! the single source of truth for "is anyone logged in, who, with what
//! role, until when":
//!
//! 1. **Establish** — atomically install a session from a sign-in bundle
//!    ([`SessionManager::establish`])
//! 2. **Enforce** — a one-shot timer plus a periodic sweep terminate the
//!    session the moment its expiry instant passes
//! 3. **Terminate** — atomically clear memory and storage, notify, and
//!    redirect ([`SessionManager::terminate`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Route guard / HTTP client (above)  ← read-only view: is_authenticated(), current()
//!     ↕
//! Session layer (this crate)         ← owns the session and its expiry contract
//!     ↕
//! Store layer (below)                ← durable mirror that survives reloads
//! ```
//!
//! All fallibility is resolved inside this crate: `current()` and
//! `is_authenticated()` are infallible reads, storage failures are logged
//! and tolerated, and expiry is self-contained recovery (notification plus
//! redirect), never an error propagated to callers.

mod clock;
mod hooks;
mod manager;
mod session;

pub use clock::{Clock, ManualClock, SystemClock};
pub use hooks::{Navigator, NoopNavigator, Notifier, TracingNotifier};
pub use manager::{SESSION_EXPIRED_NOTICE, SessionManager};
pub use session::{PUBLIC_ROUTES, Session, SessionConfig};
