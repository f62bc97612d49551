//! Durable credential storage for the TowUp client core.
//!
//! The session layer owns the authoritative in-memory session; this crate
//! provides the durable mirror that survives a page reload. Two rules keep
//! the mirror trustworthy:
//!
//! 1. **One document, written wholesale.** The token, expiry, entity id,
//!    and role are a single serialized [`SessionRecord`] — never four
//!    independently patched entries — so a reader can never observe a
//!    torn bundle.
//! 2. **Validate on the way in.** [`SessionRecord::from_json`] rejects any
//!    document that has a token but is missing expiry metadata. A record
//!    that cannot prove when it lapses is treated as already lapsed.
//!
//! Backends implement the [`CredentialStore`] trait: [`FileStore`] for
//! durable storage, [`MemoryStore`] for tests and environments where
//! durable storage is unavailable.

mod error;
mod file;
mod record;
mod store;

pub use error::StoreError;
pub use file::FileStore;
pub use record::SessionRecord;
pub use store::{CredentialStore, MemoryStore};
