//! Integration tests for the session lifecycle across simulated reloads.
//!
//! Uses a real `FileStore` in a temp directory as the durable mirror and
//! a `ManualClock` for expiry decisions. "Reload" means dropping the
//! manager and building a fresh one over the same store — exactly what a
//! page reload does to in-memory state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use towup_identity::{EntityId, Role, SignInResponse};
use towup_session::{
    ManualClock, Navigator, Notifier, SESSION_EXPIRED_NOTICE, SessionConfig,
    SessionManager,
};
use towup_store::{CredentialStore, FileStore};

// =========================================================================
// Doubles
// =========================================================================

#[derive(Default)]
struct RecordingNotifier {
    warnings: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, _message: &str) {}
    fn warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

struct RecordingNavigator {
    path: Mutex<String>,
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn at(path: &str) -> Self {
        Self {
            path: Mutex::new(path.to_string()),
            visits: Mutex::new(Vec::new()),
        }
    }
    fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.lock().unwrap().clone()
    }
    fn navigate(&self, to: &str) {
        self.visits.lock().unwrap().push(to.to_string());
        *self.path.lock().unwrap() = to.to_string();
    }
}

// =========================================================================
// Helpers
// =========================================================================

struct Tab {
    manager: SessionManager,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

/// Builds a manager over `store` and `clock`, as if a tab just loaded
/// with the user on `path`.
fn open_tab(store: Arc<FileStore>, clock: Arc<ManualClock>, path: &str) -> Tab {
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::at(path));
    let manager = SessionManager::new(
        SessionConfig::default(),
        store,
        clock,
        navigator.clone(),
        notifier.clone(),
    );
    Tab {
        manager,
        notifier,
        navigator,
    }
}

fn bundle() -> SignInResponse {
    SignInResponse {
        token: "abc".to_string(),
        expires_in: 3_600_000,
        entity_id: EntityId::from("42"),
        role: Role::FleetOwner,
    }
}

// =========================================================================
// Reload round trip
// =========================================================================

#[test]
fn test_session_survives_a_reload() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("session.json")));
    let clock = Arc::new(ManualClock::new(1_000_000));

    let first = open_tab(store.clone(), clock.clone(), "/fleetowner/profile");
    first.manager.establish(bundle());
    let established = first.manager.current().unwrap();
    drop(first);

    let reloaded = open_tab(store, clock, "/fleetowner/profile");
    let restored = reloaded.manager.restore().expect("session should survive");

    assert_eq!(restored, established);
    assert!(reloaded.manager.is_authenticated());
    assert!(reloaded.notifier.warnings().is_empty());
}

#[test]
fn test_reload_after_expiry_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("session.json")));
    let clock = Arc::new(ManualClock::new(1_000_000));

    let first = open_tab(store.clone(), clock.clone(), "/fleetowner/profile");
    first.manager.establish(bundle());
    drop(first);

    // The browser was closed past the token lifetime.
    clock.advance(4_000_000);

    let reloaded = open_tab(store.clone(), clock, "/fleetowner/profile");
    assert!(reloaded.manager.restore().is_none());
    assert!(!reloaded.manager.is_authenticated());
    assert!(store.load().unwrap().is_none(), "stale record must be removed");
    assert_eq!(reloaded.notifier.warnings(), vec![SESSION_EXPIRED_NOTICE]);
    assert_eq!(reloaded.navigator.visits(), vec!["/login"]);
}

#[test]
fn test_reload_with_partial_record_fails_closed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    // Seeded the way the legacy cookie layout could end up: a token with
    // no expiry metadata.
    std::fs::write(&path, r#"{"token":"xyz"}"#).unwrap();

    let store = Arc::new(FileStore::new(path.clone()));
    let clock = Arc::new(ManualClock::new(1_000_000));
    let tab = open_tab(store, clock, "/fleetowner/profile");

    assert!(tab.manager.restore().is_none());
    assert!(!tab.manager.is_authenticated());
    assert!(!path.exists(), "invalid record must be removed from disk");
    assert_eq!(tab.notifier.warnings(), vec![SESSION_EXPIRED_NOTICE]);
}

#[test]
fn test_logout_clears_the_durable_mirror() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("session.json")));
    let clock = Arc::new(ManualClock::new(1_000_000));

    let tab = open_tab(store.clone(), clock.clone(), "/fleetowner/profile");
    tab.manager.establish(bundle());
    tab.manager.terminate(None);
    drop(tab);

    // A later load finds nothing and stays silent.
    let reloaded = open_tab(store, clock, "/");
    assert!(reloaded.manager.restore().is_none());
    assert!(reloaded.notifier.warnings().is_empty());
    assert!(reloaded.navigator.visits().is_empty());
}

// =========================================================================
// Restored sessions are watched
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_restored_session_expires_on_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(FileStore::new(dir.path().join("session.json")));
    let clock = Arc::new(ManualClock::new(1_000_000));

    let first = open_tab(store.clone(), clock.clone(), "/fleetowner/profile");
    first.manager.establish(SignInResponse {
        expires_in: 500,
        ..bundle()
    });
    drop(first);

    let reloaded = open_tab(store.clone(), clock.clone(), "/fleetowner/profile");
    reloaded.manager.restore().expect("session should restore");
    assert!(reloaded.manager.is_authenticated());

    clock.advance(600);
    tokio::time::advance(Duration::from_millis(600)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }

    assert!(!reloaded.manager.is_authenticated());
    assert!(reloaded.manager.current().is_none());
    assert!(store.load().unwrap().is_none());
    assert_eq!(reloaded.notifier.warnings(), vec![SESSION_EXPIRED_NOTICE]);
    assert_eq!(reloaded.navigator.visits(), vec!["/login"]);
}
