//! File-backed credential store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{CredentialStore, SessionRecord, StoreError};

/// A [`CredentialStore`] backed by a single JSON document on disk.
///
/// Writes go to a sibling temp file first and are moved into place with a
/// rename, so a concurrent reader (another tab, a crashed previous run)
/// sees either the old complete document or the new complete document,
/// never a torn one.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the stored document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Result<Option<SessionRecord>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        SessionRecord::from_json(&raw)
    }

    fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        let json = record.to_json()?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "session record persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
