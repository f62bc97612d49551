//! Identity types for the TowUp client core.
//!
//! This crate defines WHO can be signed in and WHAT the backend hands the
//! client on a successful sign-in:
//!
//! 1. **Principals** — [`EntityId`] and [`Role`], the authenticated
//!    identity of the current browser session
//! 2. **Auth contract** — [`SignInRequest`] / [`SignInResponse`], the wire
//!    shape of the backend's `/auth/login` exchange
//!
//! # How it fits in the stack
//!
//! ```text
//! Facade / HTTP client (above)  ← decodes SignInResponse from the backend
//!     ↕
//! Session layer                 ← stores EntityId + Role in the live session
//!     ↕
//! Identity layer (this crate)   ← provides the shared types
//! ```

mod contract;
mod error;
mod types;

pub use contract::{SignInRequest, SignInResponse};
pub use error::IdentityError;
pub use types::{EntityId, Role};
