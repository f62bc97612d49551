use std::sync::Arc;
use std::time::Duration;

use towup::prelude::*;
use towup::{Navigator, Notifier, SystemClock};

// ---------------------------------------------------------------------------
// Console hooks
// ---------------------------------------------------------------------------

struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn success(&self, message: &str) {
        println!("[toast:success] {message}");
    }
    fn warning(&self, message: &str) {
        println!("[toast:warning] {message}");
    }
}

struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn current_path(&self) -> String {
        "/fleetowner/profile".to_string()
    }
    fn navigate(&self, path: &str) {
        println!("[router] -> {path}");
    }
}

fn show(guard: &RouteGuard, path: &str) {
    println!("  {path:<28} {:?}", guard.check(path));
}

#[tokio::main]
async fn main() {
    towup::init_tracing();

    let store_path = std::env::temp_dir().join("towup-demo-session.json");
    let store = Arc::new(FileStore::new(&store_path));
    let manager = SessionManager::new(
        SessionConfig::default(),
        store,
        Arc::new(SystemClock),
        Arc::new(ConsoleNavigator),
        Arc::new(ConsoleNotifier),
    );
    let guard = RouteGuard::new(manager.clone(), RouteTable::towup());

    println!("anonymous:");
    show(&guard, "/");
    show(&guard, "/fleetowner/profile");
    show(&guard, "/approve/users");

    // Pretend POST /auth/login answered with a three-second token.
    manager.establish(SignInResponse {
        token: "demo-token".to_string(),
        expires_in: 3_000,
        entity_id: EntityId::from("42"),
        role: Role::FleetOwner,
    });

    println!("\nsigned in as fleet owner (session mirrored to {}):", store_path.display());
    show(&guard, "/fleetowner/profile");
    show(&guard, "/profile/account/edit");
    show(&guard, "/towtruckop/profile");
    show(&guard, "/approve/users");

    println!("\nwaiting for the expiry timer...");
    tokio::time::sleep(Duration::from_millis(3_500)).await;

    println!("\nafter expiry:");
    show(&guard, "/fleetowner/profile");
    println!("  authenticated: {}", manager.is_authenticated());
}
