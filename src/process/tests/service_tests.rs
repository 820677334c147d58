//! Unit tests for process catalogue service orchestration.

use std::sync::Arc;

use crate::pagination::ListParams;
use crate::process::{
    adapters::memory::InMemoryProcessRepository,
    domain::ProcessId,
    services::{CreateProcessRequest, ProcessCatalogService, ProcessServiceError},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ProcessCatalogService<InMemoryProcessRepository, DefaultClock>;

#[fixture]
fn service() -> TestService {
    ProcessCatalogService::new(
        Arc::new(InMemoryProcessRepository::new()),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_process(service: TestService) {
    let created = service
        .create(CreateProcessRequest::new("Leave request"))
        .await
        .expect("creation should succeed");

    let found = service.get(created.id()).await.expect("lookup should succeed");

    assert_eq!(found, created);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_name_is_a_validation_error(service: TestService) {
    let result = service
        .create(CreateProcessRequest::default().with_description(Some("no name".to_owned())))
        .await;

    match result {
        Err(ProcessServiceError::Validation(errors)) => assert!(errors.has_field("name")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_name_is_a_validation_error(service: TestService) {
    service
        .create(CreateProcessRequest::new("Leave request"))
        .await
        .expect("first creation should succeed");

    let duplicate = service
        .create(CreateProcessRequest::new("  Leave request  "))
        .await;

    assert!(matches!(duplicate, Err(ProcessServiceError::Validation(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_process_is_not_found(service: TestService) {
    let id = ProcessId::new();
    let result = service.get(id).await;
    assert!(matches!(result, Err(ProcessServiceError::NotFound(missing)) if missing == id));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_filters_and_sorts_by_name(service: TestService) {
    for name in ["Invoice approval", "Expense claim", "Invoice dispute"] {
        service
            .create(CreateProcessRequest::new(name))
            .await
            .expect("creation should succeed");
    }

    let params = ListParams {
        filter: Some("invoice".to_owned()),
        sort_order: Some("desc".to_owned()),
        ..ListParams::default()
    };
    let (query, page) = service.list(params).await.expect("listing should succeed");

    let names: Vec<&str> = page.items().iter().map(|p| p.name().as_str()).collect();
    assert_eq!(names, ["Invoice dispute", "Invoice approval"]);
    assert_eq!(page.total(), 2);
    assert_eq!(query.filter(), Some("invoice"));
}
