//! Collaborator seams: navigation and user notification.
//!
//! The session manager never talks to a router or a toast system directly.
//! It calls these traits, and the embedding application decides what a
//! "navigation" or a "notification" means — a history push in a browser
//! shell, a log line in a headless test harness. The seams keep the
//! manager testable in isolation and its dependencies explicit.

/// Drives route transitions and reports the current location.
///
/// `current_path` exists so the manager can skip the expiry redirect on
/// public routes: an expired visitor reading the signup page stays there,
/// only the session state is cleared.
pub trait Navigator: Send + Sync + 'static {
    /// The path the user is currently on (e.g. `/fleetowner/profile`).
    fn current_path(&self) -> String;

    /// Navigates the user to `to`.
    fn navigate(&self, to: &str);
}

/// Surfaces transient, toast-style messages to the user.
pub trait Notifier: Send + Sync + 'static {
    /// A success message (e.g. after sign-in).
    fn success(&self, message: &str);

    /// A warning message (e.g. "Session expired. Logging out...").
    fn warning(&self, message: &str);
}

/// A navigator for headless use: reports the root path and logs
/// navigation requests instead of performing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_path(&self) -> String {
        "/".to_string()
    }

    fn navigate(&self, to: &str) {
        tracing::debug!(to, "navigation requested (no navigator attached)");
    }
}

/// A notifier that routes messages to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message, "notification");
    }

    fn warning(&self, message: &str) {
        tracing::warn!(message, "notification");
    }
}
