//! Route guarding for the TowUp client core.
//!
//! Gates navigation on the session manager's state:
//!
//! 1. **Policy lookup** — every path maps to a [`RoutePolicy`]: public,
//!    any authenticated session, or a specific [`Role`](towup_identity::Role)
//! 2. **Decision** — [`RouteGuard::check`] turns the policy plus the live
//!    session state into a [`GuardDecision`]: admit, redirect to sign-in,
//!    or redirect to access-denied
//!
//! The guard holds only a read-only view of the session (via the cloned
//! [`SessionManager`](towup_session::SessionManager) handle); it never
//! mutates session state.

mod guard;
mod table;

pub use guard::{GuardDecision, RouteGuard};
pub use table::{RoutePolicy, RouteTable};
