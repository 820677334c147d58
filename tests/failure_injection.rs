//! Repository failures surface as opaque 500 responses.

mod test_helpers;

use async_trait::async_trait;
use axum::http::StatusCode;
use mockable::DefaultClock;
use mockall::mock;
use palladio::api::AppState;
use palladio::cancellation::adapters::memory::InMemoryCanceledRequestRepository;
use palladio::pagination::Page;
use palladio::process::{
    domain::{Process, ProcessId, ProcessName},
    ports::{ProcessListQuery, ProcessRepository, ProcessRepositoryError, ProcessRepositoryResult},
};
use palladio::script::adapters::memory::InMemoryScriptRepository;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;
use test_helpers::TestApp;

mock! {
    Processes {}

    #[async_trait]
    impl ProcessRepository for Processes {
        async fn insert(&self, process: &Process) -> ProcessRepositoryResult<()>;
        async fn find_by_id(&self, id: ProcessId) -> ProcessRepositoryResult<Option<Process>>;
        async fn find_by_name(
            &self,
            name: &ProcessName,
        ) -> ProcessRepositoryResult<Option<Process>>;
        async fn list(&self, query: &ProcessListQuery) -> ProcessRepositoryResult<Page<Process>>;
    }
}

fn unavailable() -> ProcessRepositoryError {
    ProcessRepositoryError::persistence(std::io::Error::other(
        "could not connect to server: db.internal:5432",
    ))
}

fn app_with(processes: MockProcesses) -> TestApp {
    TestApp::with_state(AppState::new(
        Arc::new(processes),
        Arc::new(InMemoryScriptRepository::new()),
        Arc::new(InMemoryCanceledRequestRepository::new()),
        Arc::new(DefaultClock),
    ))
}

#[rstest]
#[tokio::test]
async fn process_lookup_failure_is_internal_error() {
    let mut processes = MockProcesses::new();
    processes
        .expect_find_by_id()
        .returning(|_| Err(unavailable()));
    let app = app_with(processes);

    let response = app
        .get(&format!("/processes/{}/scripts", ProcessId::new()))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body, json!({"message": "Internal server error."}));
}

#[rstest]
#[tokio::test]
async fn insert_failure_is_internal_error() {
    let mut processes = MockProcesses::new();
    processes.expect_find_by_name().returning(|_| Ok(None));
    processes
        .expect_insert()
        .times(1)
        .returning(|_| Err(unavailable()));
    let app = app_with(processes);

    let response = app.post("/processes", &json!({"name": "Payroll"})).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !response.body.to_string().contains("db.internal"),
        "internal details must not leak"
    );
}
