//! Clock abstraction for expiry checks.
//!
//! Every expiry decision compares the session's absolute expiry instant
//! against *a clock read at the moment of the check* — never a cached
//! "not yet expired" flag. Making the clock a trait keeps those decisions
//! deterministic under test: production uses [`SystemClock`], tests use a
//! [`ManualClock`] they advance by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current wall-clock time.
///
/// Wall clock (not monotonic) on purpose: the expiry instant is persisted
/// across reloads and must survive process restarts and device suspends,
/// which a monotonic reading cannot.
pub trait Clock: Send + Sync + 'static {
    /// Current time as milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            // A clock set before 1970 reads as 0, which fails every
            // expiry check. Fail closed rather than panic.
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

/// A hand-advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicU64,
}

impl ManualClock {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    /// Moves the clock forward by `delta_ms` milliseconds.
    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute instant.
    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

// =========================================================================
// Tests
// =========================================================================
