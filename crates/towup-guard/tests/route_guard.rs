//! Integration tests: the route guard over a live session lifecycle.
//!
//! Walks a visitor through the same journey the application does:
//! anonymous browsing, sign-in, role-gated navigation, expiry, logout.

use std::sync::Arc;

use towup_guard::{GuardDecision, RouteGuard, RouteTable};
use towup_identity::{EntityId, Role, SignInResponse};
use towup_session::{ManualClock, NoopNavigator, SessionConfig, SessionManager, TracingNotifier};
use towup_store::MemoryStore;

struct World {
    manager: SessionManager,
    guard: RouteGuard,
    clock: Arc<ManualClock>,
    store: Arc<MemoryStore>,
}

fn world() -> World {
    let clock = Arc::new(ManualClock::new(1_000_000));
    let store = Arc::new(MemoryStore::new());
    let manager = SessionManager::new(
        SessionConfig::default(),
        store.clone(),
        clock.clone(),
        Arc::new(NoopNavigator),
        Arc::new(TracingNotifier),
    );
    let guard = RouteGuard::new(manager.clone(), RouteTable::towup());
    World {
        manager,
        guard,
        clock,
        store,
    }
}

fn fleet_owner_bundle() -> SignInResponse {
    SignInResponse {
        token: "abc".to_string(),
        expires_in: 3_600_000,
        entity_id: EntityId::from("42"),
        role: Role::FleetOwner,
    }
}

#[test]
fn test_anonymous_visitor_journey() {
    let w = world();

    // Marketing and signup flow stay open.
    assert!(w.guard.admit("/"));
    assert!(w.guard.admit("/fleetowner/signup"));
    assert!(w.guard.admit("/login"));

    // Everything else bounces to sign-in.
    assert_eq!(
        w.guard.check("/fleetowner/profile"),
        GuardDecision::RedirectToSignIn
    );
    assert_eq!(
        w.guard.check("/profile/account/edit"),
        GuardDecision::RedirectToSignIn
    );
}

#[test]
fn test_signed_in_fleet_owner_journey() {
    let w = world();
    w.manager.establish(fleet_owner_bundle());

    assert!(w.guard.admit("/fleetowner/profile"));
    assert!(w.guard.admit("/profile/documents/edit"));

    // Other account types' homes and admin screens are off limits.
    assert_eq!(
        w.guard.check("/towtruckop/profile"),
        GuardDecision::RedirectToAccessDenied
    );
    assert_eq!(
        w.guard.check("/approve/users"),
        GuardDecision::RedirectToAccessDenied
    );

    // Public routes stay reachable while signed in.
    assert!(w.guard.admit("/"));
}

#[test]
fn test_expiry_locks_the_visitor_out_without_a_sweep() {
    let w = world();
    w.manager.establish(fleet_owner_bundle());
    assert!(w.guard.admit("/fleetowner/profile"));

    // The token lapses; no timer or sweep has run. The guard's live-clock
    // check must already reject the navigation.
    w.clock.advance(4_000_000);

    assert_eq!(
        w.guard.check("/fleetowner/profile"),
        GuardDecision::RedirectToSignIn
    );

    // A navigation-time sweep then finishes the cleanup.
    w.manager.sweep();
    assert!(w.manager.current().is_none());
    assert!(w.store.is_empty());
}

#[test]
fn test_logout_restores_the_anonymous_view() {
    let w = world();
    w.manager.establish(fleet_owner_bundle());
    assert!(w.guard.admit("/fleetowner/profile"));

    w.manager.terminate(Some("user logout"));

    assert_eq!(
        w.guard.check("/fleetowner/profile"),
        GuardDecision::RedirectToSignIn
    );
    assert!(w.guard.admit("/login"));
}

#[test]
fn test_admin_journey() {
    let w = world();
    w.manager.establish(SignInResponse {
        token: "adm".to_string(),
        expires_in: 3_600_000,
        entity_id: EntityId::from("1"),
        role: Role::SysAdmin,
    });

    assert!(w.guard.admit("/approve/users"));
    assert!(w.guard.admit("/approve/documents"));
    assert!(w.guard.admit("/profile/account/edit"));
    assert_eq!(
        w.guard.check("/repocompany/profile"),
        GuardDecision::RedirectToAccessDenied
    );
}
