//! The route table: which paths demand which access level.

use towup_identity::Role;

/// The access requirement for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePolicy {
    /// Reachable by anyone, including expired or anonymous visitors.
    Public,
    /// Requires a valid session of any role.
    Authenticated,
    /// Requires a valid session with exactly this role.
    Role(Role),
}

/// Maps paths to policies by exact match.
///
/// Paths not present in the table resolve to
/// [`RoutePolicy::Authenticated`] — an unlisted screen fails closed
/// rather than leaking to anonymous visitors.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<(String, RoutePolicy)>,
}

impl RouteTable {
    /// An empty table (everything falls through to `Authenticated`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route. Builder-style so tables read as declarations.
    pub fn route(mut self, path: &str, policy: RoutePolicy) -> Self {
        self.routes.push((path.to_string(), policy));
        self
    }

    /// Looks up the policy for `path`.
    pub fn policy(&self, path: &str) -> RoutePolicy {
        self.routes
            .iter()
            .find(|(route, _)| route == path)
            .map(|(_, policy)| *policy)
            .unwrap_or(RoutePolicy::Authenticated)
    }

    /// The TowUp application's route table: the marketing, signup, and
    /// verification flow is public; each profile home is gated on its
    /// account type; approval screens are admin-only; the shared
    /// profile-editing screens accept any authenticated session.
    pub fn towup() -> Self {
        Self::new()
            .route("/", RoutePolicy::Public)
            .route("/login", RoutePolicy::Public)
            .route("/fleetowner/signup", RoutePolicy::Public)
            .route("/repocompany/signup", RoutePolicy::Public)
            .route("/towtruckop/signup", RoutePolicy::Public)
            .route("/signup-confirmation", RoutePolicy::Public)
            .route("/verify-email", RoutePolicy::Public)
            .route("/fleetowner/profile", RoutePolicy::Role(Role::FleetOwner))
            .route("/repocompany/profile", RoutePolicy::Role(Role::RepoCompany))
            .route("/towtruckop/profile", RoutePolicy::Role(Role::TowTruck))
            .route("/approve/users", RoutePolicy::Role(Role::SysAdmin))
            .route("/approve/documents", RoutePolicy::Role(Role::SysAdmin))
            .route("/profile/account/edit", RoutePolicy::Authenticated)
            .route("/profile/user/edit", RoutePolicy::Authenticated)
            .route("/profile/regions/edit", RoutePolicy::Authenticated)
            .route("/profile/documents/edit", RoutePolicy::Authenticated)
            .route("/profile/telematics/edit", RoutePolicy::Authenticated)
            .route("/profile/notifications", RoutePolicy::Authenticated)
    }
}

// =========================================================================
// Tests
// =========================================================================
