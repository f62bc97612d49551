//! The session manager: single source of truth for the authenticated
//! session and enforcement of its expiry contract.
//!
//! Lifecycle:
//!
//! ```text
//! establish() ──→ [Authenticated] ──(expiry instant passes)──→ [Expired]
//!      ↑                │                                          │
//!      │           terminate()                               (cleanup: same
//!      │                │                                     routine as
//!      │                ▼                                     terminate)
//!      └────────── [Anonymous] ←──────────────────────────────────┘
//! ```
//!
//! `Expired` is transient and never externally observable:
//! [`SessionManager::is_authenticated`] compares the expiry instant
//! against the live clock on every call, so a session past its expiry
//! reads as unauthenticated even before the cleanup side effects run.
//!
//! # Concurrency note
//!
//! The manager is a cheaply cloneable handle around `Arc<Mutex<_>>` state.
//! All mutations complete their atomic write (memory + persisted mirror)
//! inside a single lock section, so a reader can never observe a partial
//! session. Watch tasks are stamped with an epoch; establish and terminate
//! bump the epoch and abort the old tasks, so a stale timer firing late is
//! a no-op against a replacement session.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use towup_identity::SignInResponse;
use towup_store::{CredentialStore, SessionRecord, StoreError};

use crate::{
    Clock, Navigator, NoopNavigator, Notifier, Session, SessionConfig,
    SystemClock, TracingNotifier,
};

/// The user-visible message for every automatic logout, whether the cause
/// was a genuine expiry or a malformed persisted record. Keeping the
/// message identical avoids leaking internal state corruption as a
/// distinct, more alarming error.
pub const SESSION_EXPIRED_NOTICE: &str = "Session expired. Logging out...";

/// The pending expiry timers for the current session.
struct WatchTasks {
    one_shot: JoinHandle<()>,
    sweep: JoinHandle<()>,
}

impl WatchTasks {
    fn abort(&self) {
        self.one_shot.abort();
        self.sweep.abort();
    }
}

/// Mutable session state, behind the manager's lock.
struct Inner {
    session: Option<Session>,
    /// Bumped on every establish/terminate. Watch tasks carry the epoch
    /// they were spawned under and do nothing if it has moved on.
    epoch: u64,
    watch: Option<WatchTasks>,
}

/// Owns the authenticated identity of the current browser session.
///
/// Collaborators (clock, store, navigator, notifier) are injected rather
/// than read from ambient scope, so the manager can be exercised in
/// isolation with test doubles.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Mutex<Inner>>,
    config: SessionConfig,
    store: Arc<dyn CredentialStore>,
    clock: Arc<dyn Clock>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SessionManager {
    /// Creates a manager with explicit collaborators.
    pub fn new(
        config: SessionConfig,
        store: Arc<dyn CredentialStore>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: None,
                epoch: 0,
                watch: None,
            })),
            config,
            store,
            clock,
            navigator,
            notifier,
        }
    }

    /// Creates a manager with the system clock, a logging notifier, and no
    /// navigator — enough for headless use and most tests.
    pub fn with_defaults(store: Arc<dyn CredentialStore>) -> Self {
        Self::new(
            SessionConfig::default(),
            store,
            Arc::new(SystemClock),
            Arc::new(NoopNavigator),
            Arc::new(TracingNotifier),
        )
    }

    // -- Reads ------------------------------------------------------------

    /// A snapshot of the current session, or `None` when anonymous.
    /// Pure read, no side effects.
    pub fn current(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// `true` iff a session is present and its expiry instant is strictly
    /// in the future *right now*.
    ///
    /// Always compares against the live clock — never a cached flag — so a
    /// lapsed session reads as unauthenticated even if the cleanup timers
    /// have not fired yet.
    pub fn is_authenticated(&self) -> bool {
        let inner = self.lock();
        match &inner.session {
            Some(session) => session.expires_at_ms > self.clock.now_ms(),
            None => false,
        }
    }

    /// The `Authorization` header value for outgoing requests, or `None`
    /// when no valid session exists. An expired token is never attached.
    pub fn authorization(&self) -> Option<String> {
        let inner = self.lock();
        match &inner.session {
            Some(session) if session.expires_at_ms > self.clock.now_ms() => {
                Some(format!("Bearer {}", session.token))
            }
            _ => None,
        }
    }

    // -- Establish --------------------------------------------------------

    /// Atomically installs a session from a sign-in bundle and arms the
    /// expiry watch.
    ///
    /// The in-memory session and the persisted mirror are written in the
    /// same lock section; a storage failure is logged and tolerated (the
    /// session stays valid for this page lifetime, it just will not
    /// survive a reload). A bundle whose lifetime is already zero fails
    /// closed immediately.
    pub fn establish(&self, bundle: SignInResponse) {
        let now = self.clock.now_ms();
        if bundle.expires_in == 0 {
            tracing::warn!("sign-in bundle arrived already lapsed");
            self.clear_session(None);
            self.notifier.warning(SESSION_EXPIRED_NOTICE);
            self.redirect_unless_public();
            return;
        }

        let session = Session {
            token: bundle.token,
            expires_at_ms: now.saturating_add(bundle.expires_in),
            entity_id: bundle.entity_id,
            role: bundle.role,
        };

        {
            let mut inner = self.lock();
            if let Some(watch) = inner.watch.take() {
                watch.abort();
            }
            inner.epoch += 1;
            inner.session = Some(session.clone());
            if let Err(err) = self.store.save(&SessionRecord::from(&session)) {
                tracing::warn!(
                    error = %err,
                    "could not persist session; it will not survive a reload"
                );
            }
            let epoch = inner.epoch;
            inner.watch = self.spawn_watch(epoch, bundle.expires_in);
        }

        tracing::info!(
            entity_id = %session.entity_id,
            role = %session.role,
            expires_at_ms = session.expires_at_ms,
            "session established"
        );
    }

    // -- Terminate --------------------------------------------------------

    /// Atomically clears the session, then notifies (if a reason is given)
    /// and navigates to the sign-in route.
    ///
    /// Idempotent: when the session is already empty — including the
    /// second of two racing calls — nothing is notified and no navigation
    /// is triggered.
    pub fn terminate(&self, reason: Option<&str>) {
        let destination = self.config.sign_in_route.clone();
        self.terminate_to(reason, &destination);
    }

    /// [`terminate`](Self::terminate) with an explicit destination.
    pub fn terminate_to(&self, reason: Option<&str>, destination: &str) {
        if !self.clear_session(None) {
            tracing::debug!("terminate on an empty session");
            return;
        }
        if let Some(reason) = reason {
            self.notifier.warning(reason);
        }
        self.navigator.navigate(destination);
        tracing::info!(destination, "session terminated");
    }

    // -- Rehydration ------------------------------------------------------

    /// Rebuilds the in-memory session from persisted storage on cold load.
    ///
    /// The stored record is re-validated through the same expiry check the
    /// sweep uses — stored data is never trusted without re-checking the
    /// clock. A malformed or partial record (a token with no expiry) is
    /// discarded and surfaced to the user exactly like a normal expiry.
    pub fn restore(&self) -> Option<Session> {
        let record = match self.store.load() {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(err @ (StoreError::Malformed(_) | StoreError::Incomplete(_))) => {
                tracing::warn!(error = %err, "persisted session rejected, failing closed");
                self.discard_persisted();
                return None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not read persisted session");
                return None;
            }
        };

        let now = self.clock.now_ms();
        if record.expires_at <= now {
            tracing::info!("persisted session already expired");
            self.discard_persisted();
            return None;
        }

        let session = Session::from(record);
        let remaining_ms = session.expires_at_ms - now;
        {
            let mut inner = self.lock();
            if let Some(watch) = inner.watch.take() {
                watch.abort();
            }
            inner.epoch += 1;
            inner.session = Some(session.clone());
            let epoch = inner.epoch;
            inner.watch = self.spawn_watch(epoch, remaining_ms);
        }

        tracing::info!(
            entity_id = %session.entity_id,
            role = %session.role,
            "session restored from storage"
        );
        Some(session)
    }

    // -- Expiry enforcement -----------------------------------------------

    /// Re-validates the session's expiry against the live clock, exactly
    /// as the periodic sweep does. Safe to call at any time (navigation
    /// hooks, tests); a valid or absent session is a no-op.
    pub fn sweep(&self) {
        let epoch = self.lock().epoch;
        self.check_expiry(epoch);
    }

    /// The body of every watch firing. `epoch` guards against a stale
    /// timer from a session that has since been replaced or terminated.
    fn check_expiry(&self, epoch: u64) {
        let lapsed = {
            let inner = self.lock();
            if inner.epoch != epoch {
                return;
            }
            match &inner.session {
                Some(session) => session.expires_at_ms <= self.clock.now_ms(),
                None => return,
            }
        };
        if lapsed && self.clear_session(Some(epoch)) {
            tracing::info!("session expired, logging out");
            self.notifier.warning(SESSION_EXPIRED_NOTICE);
            self.redirect_unless_public();
        }
    }

    /// Arms the one-shot timer and the recurring sweep for a session with
    /// `remaining_ms` of life left.
    ///
    /// The one-shot fires at the expiry instant under normal operation;
    /// the sweep is the backstop for the case where the device suspends
    /// and the wall clock jumps past the expiry while timers were frozen.
    ///
    /// Without an async runtime (plain synchronous tests) the watch is
    /// disabled; expiry is still enforced by the live-clock check in
    /// `is_authenticated` and by explicit [`sweep`](Self::sweep) calls.
    fn spawn_watch(&self, epoch: u64, remaining_ms: u64) -> Option<WatchTasks> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime; expiry watch disabled");
            return None;
        };

        let manager = self.clone();
        let one_shot = runtime.spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(remaining_ms)).await;
            manager.check_expiry(epoch);
        });

        let manager = self.clone();
        let period = self.config.sweep_interval;
        let sweep = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // A sweep that overslept (device suspend) should run once,
            // not burst to catch up.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await; // first tick completes immediately
            loop {
                ticker.tick().await;
                manager.check_expiry(epoch);
            }
        });

        Some(WatchTasks { one_shot, sweep })
    }

    // -- Internals --------------------------------------------------------

    /// Clears memory and the persisted mirror in one lock section, and
    /// cancels the watch. Returns whether a session was present.
    ///
    /// When `expected_epoch` is given, the clear only proceeds if the
    /// epoch still matches — an expiry firing concurrently with a fresh
    /// establish must not tear down the new session.
    fn clear_session(&self, expected_epoch: Option<u64>) -> bool {
        let mut inner = self.lock();
        if let Some(expected) = expected_epoch {
            if inner.epoch != expected {
                return false;
            }
        }
        if let Some(watch) = inner.watch.take() {
            watch.abort();
        }
        inner.epoch += 1;
        let had_session = inner.session.take().is_some();
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "could not clear persisted session");
        }
        had_session
    }

    /// Drops an invalid persisted record and surfaces it to the user the
    /// same way a normal expiry is surfaced.
    fn discard_persisted(&self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "could not clear persisted session");
        }
        self.notifier.warning(SESSION_EXPIRED_NOTICE);
        self.redirect_unless_public();
    }

    fn redirect_unless_public(&self) {
        let path = self.navigator.current_path();
        if self.config.is_public(&path) {
            tracing::debug!(%path, "expiry on a public route, skipping redirect");
            return;
        }
        self.navigator.navigate(&self.config.sign_in_route);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("session state lock poisoned")
    }
}

// =========================================================================
// Tests
// =========================================================================
