//! Shared test helpers for `PostgreSQL` integration tests.

use crate::test_helpers::TestApp;
use palladio::api::AppState;
use palladio::db::{build_pool, migrate_pool};
use uuid::Uuid;

/// Variable naming the scratch database used by this suite.
pub const TEST_DATABASE_URL_VAR: &str = "PALLADIO_TEST_DATABASE_URL";

/// Builds an app backed by `PostgreSQL` with every migration applied.
///
/// Migrations are idempotent, so each test may call this independently.
pub async fn postgres_app() -> TestApp {
    let url = std::env::var(TEST_DATABASE_URL_VAR)
        .unwrap_or_else(|_| panic!("{TEST_DATABASE_URL_VAR} must be set for postgres tests"));
    let pool = tokio::task::spawn_blocking(move || {
        let connected = build_pool(&url, 2).expect("pool should connect");
        migrate_pool(&connected).expect("migrations should apply");
        connected
    })
    .await
    .expect("setup task should not panic");
    TestApp::with_state(AppState::postgres(&pool))
}

/// Returns a 32-character alphanumeric token unique to this call.
pub fn unique_token() -> String {
    Uuid::new_v4().simple().to_string().to_uppercase()
}

/// Returns `prefix` suffixed with a unique token.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix} {}", unique_token())
}
