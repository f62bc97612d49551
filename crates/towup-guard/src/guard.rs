//! The guard itself: session state + route table → admit or redirect.

use towup_session::SessionManager;

use crate::{RoutePolicy, RouteTable};

/// The outcome of a guard check for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The navigation may proceed.
    Allow,
    /// No valid session; send the visitor to the sign-in entry point.
    RedirectToSignIn,
    /// Valid session, wrong role; send the visitor to the access-denied
    /// screen.
    RedirectToAccessDenied,
}

/// Gates navigation on the live session state.
///
/// Role checks use strict equality — there is no admin override; an
/// admin visiting a fleet-owner screen is denied like anyone else.
pub struct RouteGuard {
    manager: SessionManager,
    table: RouteTable,
    sign_in_route: String,
    access_denied_route: String,
}

impl RouteGuard {
    /// Creates a guard with the default redirect destinations
    /// (`/login`, `/access-denied`).
    pub fn new(manager: SessionManager, table: RouteTable) -> Self {
        Self {
            manager,
            table,
            sign_in_route: "/login".to_string(),
            access_denied_route: "/access-denied".to_string(),
        }
    }

    /// Overrides the redirect destinations.
    pub fn with_destinations(
        mut self,
        sign_in_route: impl Into<String>,
        access_denied_route: impl Into<String>,
    ) -> Self {
        self.sign_in_route = sign_in_route.into();
        self.access_denied_route = access_denied_route.into();
        self
    }

    /// Decides whether a navigation to `path` may proceed.
    ///
    /// Authentication is re-checked against the live clock on every call
    /// (via [`SessionManager::is_authenticated`]), so a session that
    /// lapsed since the last check is rejected here even if the expiry
    /// sweep has not fired yet.
    pub fn check(&self, path: &str) -> GuardDecision {
        match self.table.policy(path) {
            RoutePolicy::Public => GuardDecision::Allow,
            RoutePolicy::Authenticated => {
                if self.manager.is_authenticated() {
                    GuardDecision::Allow
                } else {
                    tracing::debug!(path, "unauthenticated access, redirecting to sign-in");
                    GuardDecision::RedirectToSignIn
                }
            }
            RoutePolicy::Role(required) => {
                if !self.manager.is_authenticated() {
                    tracing::debug!(path, "unauthenticated access, redirecting to sign-in");
                    return GuardDecision::RedirectToSignIn;
                }
                match self.manager.current() {
                    Some(session) if session.role == required => GuardDecision::Allow,
                    _ => {
                        tracing::debug!(
                            path,
                            required = %required,
                            "role mismatch, access denied"
                        );
                        GuardDecision::RedirectToAccessDenied
                    }
                }
            }
        }
    }

    /// Convenience boolean: may this navigation proceed?
    pub fn admit(&self, path: &str) -> bool {
        self.check(path) == GuardDecision::Allow
    }

    /// Where a decision sends the visitor, if anywhere.
    pub fn redirect_target(&self, decision: GuardDecision) -> Option<&str> {
        match decision {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToSignIn => Some(&self.sign_in_route),
            GuardDecision::RedirectToAccessDenied => Some(&self.access_denied_route),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
