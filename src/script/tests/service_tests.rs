//! Unit tests for script service orchestration.

use std::sync::Arc;

use crate::pagination::ListParams;
use crate::process::{
    adapters::memory::InMemoryProcessRepository,
    domain::{Process, ProcessId, ProcessName},
    ports::ProcessRepository,
};
use crate::script::{
    adapters::memory::InMemoryScriptRepository,
    domain::{Script, ScriptId, ScriptLanguage},
    services::{CreateScriptRequest, ScriptService, ScriptServiceError, UpdateScriptRequest},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ScriptService<InMemoryScriptRepository, InMemoryProcessRepository, DefaultClock>;

struct Harness {
    service: TestService,
    processes: Arc<InMemoryProcessRepository>,
}

impl Harness {
    async fn process(&self, name: &str) -> ProcessId {
        let process = Process::new(
            ProcessName::new(name).expect("valid name"),
            None,
            &DefaultClock,
        );
        self.processes
            .insert(&process)
            .await
            .expect("process insert should succeed");
        process.id()
    }

    async fn script(&self, process_id: ProcessId, title: &str) -> Script {
        self.service
            .create(
                process_id,
                CreateScriptRequest::new(title, format!("{title} description"), "php"),
            )
            .await
            .expect("script creation should succeed")
    }
}

#[fixture]
fn harness() -> Harness {
    let processes = Arc::new(InMemoryProcessRepository::new());
    let service = ScriptService::new(
        Arc::new(InMemoryScriptRepository::new()),
        Arc::clone(&processes),
        Arc::new(DefaultClock),
    );
    Harness { service, processes }
}

fn validation_fields(result: Result<Script, ScriptServiceError>) -> Vec<String> {
    match result {
        Err(ScriptServiceError::Validation(errors)) => ["title", "description", "language"]
            .into_iter()
            .filter(|field| errors.has_field(field))
            .map(str::to_owned)
            .collect(),
        other => panic!("expected validation error, got {other:?}"),
    }
}

// ── Create ──────────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_and_get_round_trip(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let created = harness.script(process_id, "Compute tax").await;

    let found = harness
        .service
        .get(process_id, created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(found, created);
    assert_eq!(found.language(), ScriptLanguage::Php);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_create_reports_every_required_field(harness: Harness) {
    let process_id = harness.process("Billing").await;

    let result = harness
        .service
        .create(process_id, CreateScriptRequest::default())
        .await;

    assert_eq!(validation_fields(result), ["title", "description", "language"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unsupported_language_is_rejected(harness: Harness) {
    let process_id = harness.process("Billing").await;

    let result = harness
        .service
        .create(
            process_id,
            CreateScriptRequest::new("Compute tax", "Tax helper", "fortran"),
        )
        .await;

    assert_eq!(validation_fields(result), ["language"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_title_is_rejected_across_processes(harness: Harness) {
    let billing = harness.process("Billing").await;
    let shipping = harness.process("Shipping").await;
    harness.script(billing, "Compute tax").await;

    let result = harness
        .service
        .create(
            shipping,
            CreateScriptRequest::new("Compute tax", "Another helper", "lua"),
        )
        .await;

    assert_eq!(validation_fields(result), ["title"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn taken_title_is_reported_alongside_missing_fields(harness: Harness) {
    let process_id = harness.process("Billing").await;
    harness.script(process_id, "Compute tax").await;

    let request = CreateScriptRequest::new("Compute tax", "", "php").with_description(None);
    let result = harness.service.create(process_id, request).await;

    assert_eq!(validation_fields(result), ["title", "description"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_in_unknown_process_is_not_found(harness: Harness) {
    let missing = ProcessId::new();
    let result = harness
        .service
        .create(missing, CreateScriptRequest::new("Compute tax", "Tax", "php"))
        .await;

    assert!(matches!(result, Err(ScriptServiceError::ProcessNotFound(id)) if id == missing));
}

// ── Read ────────────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn script_is_hidden_from_other_processes(harness: Harness) {
    let billing = harness.process("Billing").await;
    let shipping = harness.process("Shipping").await;
    let script = harness.script(billing, "Compute tax").await;

    let result = harness.service.get(shipping, script.id()).await;

    assert!(matches!(result, Err(ScriptServiceError::ScriptNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_counts_only_the_process_scripts(harness: Harness) {
    let billing = harness.process("Billing").await;
    let shipping = harness.process("Shipping").await;
    for title in ["Compute tax", "Round totals", "Apply discount"] {
        harness.script(billing, title).await;
    }
    harness.script(shipping, "Label parcel").await;

    let params = ListParams {
        per_page: Some("2".to_owned()),
        ..ListParams::default()
    };
    let (_, page) = harness
        .service
        .list(billing, params)
        .await
        .expect("listing should succeed");

    let titles: Vec<&str> = page.items().iter().map(|s| s.title().as_str()).collect();
    assert_eq!(page.total(), 3);
    assert_eq!(page.total_pages(), 2);
    assert_eq!(titles, ["Apply discount", "Compute tax"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_titles_ignoring_case(harness: Harness) {
    let process_id = harness.process("Billing").await;
    for title in ["beta rates", "Alpha rates", "alpha rates", "Beta rates"] {
        harness.script(process_id, title).await;
    }

    let (_, page) = harness
        .service
        .list(process_id, ListParams::default())
        .await
        .expect("listing should succeed");

    let titles: Vec<&str> = page.items().iter().map(|s| s.title().as_str()).collect();
    assert_eq!(titles, ["Alpha rates", "alpha rates", "Beta rates", "beta rates"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_rejects_unknown_sort_field(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let params = ListParams {
        sort_by: Some("code".to_owned()),
        ..ListParams::default()
    };

    let result = harness.service.list(process_id, params).await;

    assert!(matches!(result, Err(ScriptServiceError::Validation(_))));
}

// ── Update ──────────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_title_update_is_rejected(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let script = harness.script(process_id, "Compute tax").await;

    let result = harness
        .service
        .update(
            process_id,
            script.id(),
            UpdateScriptRequest::new().with_title(Some(String::new())),
        )
        .await;

    assert_eq!(validation_fields(result), ["title"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn partial_update_keeps_untouched_fields(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let script = harness.script(process_id, "Compute tax").await;

    let updated = harness
        .service
        .update(
            process_id,
            script.id(),
            UpdateScriptRequest::new().with_code(Some("return 42;".to_owned())),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.code(), "return 42;");
    assert_eq!(updated.title(), script.title());
    assert_eq!(updated.description(), script.description());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_to_own_title_is_allowed(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let script = harness.script(process_id, "Compute tax").await;

    let result = harness
        .service
        .update(
            process_id,
            script.id(),
            UpdateScriptRequest::new().with_title(Some("Compute tax".to_owned())),
        )
        .await;

    assert!(result.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_to_taken_title_is_rejected(harness: Harness) {
    let process_id = harness.process("Billing").await;
    harness.script(process_id, "Compute tax").await;
    let other = harness.script(process_id, "Round totals").await;

    let result = harness
        .service
        .update(
            process_id,
            other.id(),
            UpdateScriptRequest::new().with_title(Some("Compute tax".to_owned())),
        )
        .await;

    assert_eq!(validation_fields(result), ["title"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_reports_taken_title_with_invalid_language(harness: Harness) {
    let process_id = harness.process("Billing").await;
    harness.script(process_id, "Compute tax").await;
    let other = harness.script(process_id, "Round totals").await;

    let result = harness
        .service
        .update(
            process_id,
            other.id(),
            UpdateScriptRequest::new()
                .with_title(Some("Compute tax".to_owned()))
                .with_language(Some("cobol".to_owned())),
        )
        .await;

    assert_eq!(validation_fields(result), ["title", "language"]);
}

// ── Delete ──────────────────────────────────────────────────────────

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_then_get_is_not_found(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let script = harness.script(process_id, "Compute tax").await;

    harness
        .service
        .delete(process_id, script.id())
        .await
        .expect("delete should succeed");
    let result = harness.service.get(process_id, script.id()).await;

    assert!(matches!(result, Err(ScriptServiceError::ScriptNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_unknown_script_is_not_found(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let result = harness.service.delete(process_id, ScriptId::new()).await;
    assert!(matches!(result, Err(ScriptServiceError::ScriptNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_title_can_be_reused(harness: Harness) {
    let process_id = harness.process("Billing").await;
    let script = harness.script(process_id, "Compute tax").await;
    harness
        .service
        .delete(process_id, script.id())
        .await
        .expect("delete should succeed");

    let recreated = harness.script(process_id, "Compute tax").await;

    assert_ne!(recreated.id(), script.id());
}
