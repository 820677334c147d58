//! Shared world state for script management BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use palladio::pagination::Page;
use palladio::process::{
    adapters::memory::InMemoryProcessRepository, domain::ProcessId,
    services::ProcessCatalogService,
};
use palladio::script::{
    adapters::memory::InMemoryScriptRepository,
    domain::Script,
    services::{CreateScriptRequest, ScriptService, ScriptServiceError},
};
use rstest::fixture;

/// Process service type used by the BDD world.
pub type TestProcessService = ProcessCatalogService<InMemoryProcessRepository, DefaultClock>;

/// Script service type used by the BDD world.
pub type TestScriptService =
    ScriptService<InMemoryScriptRepository, InMemoryProcessRepository, DefaultClock>;

/// Scenario world for script management behaviour tests.
pub struct ScriptWorld {
    /// Process catalogue sharing its repository with the script service.
    pub processes: TestProcessService,
    /// Script service under test.
    pub scripts: TestScriptService,
    /// Processes created so far, by name.
    pub process_ids: HashMap<String, ProcessId>,
    /// Process that "that process" refers to.
    pub current_process: Option<ProcessId>,
    /// Last script created in a given step.
    pub last_script: Option<Script>,
    /// Result of the last create attempt made in a when step.
    pub last_create_result: Option<Result<Script, ScriptServiceError>>,
    /// Result of the last lookup.
    pub last_get_result: Option<Result<Script, ScriptServiceError>>,
    /// Result of the last listing.
    pub last_listing: Option<Page<Script>>,
}

impl ScriptWorld {
    /// Creates a world with empty repositories.
    #[must_use]
    pub fn new() -> Self {
        let process_repository = Arc::new(InMemoryProcessRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            processes: ProcessCatalogService::new(
                Arc::clone(&process_repository),
                Arc::clone(&clock),
            ),
            scripts: ScriptService::new(
                Arc::new(InMemoryScriptRepository::new()),
                process_repository,
                clock,
            ),
            process_ids: HashMap::new(),
            current_process: None,
            last_script: None,
            last_create_result: None,
            last_get_result: None,
            last_listing: None,
        }
    }

    /// Returns the process referred to as "that process".
    pub fn current_process(&self) -> Result<ProcessId, eyre::Report> {
        self.current_process
            .ok_or_else(|| eyre::eyre!("no process in scenario world"))
    }
}

impl Default for ScriptWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ScriptWorld {
    ScriptWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Builds a complete [`CreateScriptRequest`] for a title.
pub fn build_request(title: &str) -> CreateScriptRequest {
    CreateScriptRequest::new(title, format!("{title} helper"), "php")
}
