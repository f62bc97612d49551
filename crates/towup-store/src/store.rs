//! The storage abstraction and the in-memory backend.

use std::sync::Mutex;

use crate::{SessionRecord, StoreError};

/// Durable storage for the persisted session record.
///
/// The contract is wholesale-document only: `save` replaces the entire
/// record and `clear` removes it entirely. There is deliberately no
/// field-level update — partial writes are how the original cookie layout
/// produced token-without-expiry states.
///
/// `Send + Sync` so the expiry watch tasks can share the store with the
/// main thread; `'static` because the store lives as long as the session
/// manager.
pub trait CredentialStore: Send + Sync + 'static {
    /// Loads the stored record, if any.
    ///
    /// `Ok(None)` means the store is empty (anonymous). Validation errors
    /// (`Malformed`, `Incomplete`) surface so the caller can fail closed.
    fn load(&self) -> Result<Option<SessionRecord>, StoreError>;

    /// Replaces the stored record wholesale.
    fn save(&self, record: &SessionRecord) -> Result<(), StoreError>;

    /// Removes the stored record. Idempotent: clearing an empty store is
    /// a no-op.
    fn clear(&self) -> Result<(), StoreError>;
}

/// An in-memory store.
///
/// Used in tests and as the fallback when durable storage is unavailable
/// (private browsing, quota exceeded): the session then simply does not
/// survive a reload.
///
/// Holds the raw serialized document rather than the typed record so
/// tests can seed malformed state and exercise the fail-closed path.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with a raw document, bypassing validation.
    /// Test hook for corrupted/partial persisted state.
    pub fn seed(&self, raw: impl Into<String>) {
        *self.lock() = Some(raw.into());
    }

    /// Returns `true` if no document is stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_none()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.document.lock().expect("store lock poisoned")
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionRecord>, StoreError> {
        match self.lock().as_deref() {
            Some(raw) => SessionRecord::from_json(raw),
            None => Ok(None),
        }
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let json = record.to_json()?;
        *self.lock() = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock() = None;
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
