//! Shared handler state.

use crate::cancellation::{
    adapters::{
        memory::InMemoryCanceledRequestRepository, postgres::PostgresCanceledRequestRepository,
    },
    ports::CanceledRequestRepository,
    services::CancellationLedgerService,
};
use crate::db::PgPool;
use crate::process::{
    adapters::{memory::InMemoryProcessRepository, postgres::PostgresProcessRepository},
    ports::ProcessRepository,
    services::ProcessCatalogService,
};
use crate::script::{
    adapters::{memory::InMemoryScriptRepository, postgres::PostgresScriptRepository},
    ports::ScriptRepository,
    services::ScriptService,
};
use mockable::{Clock, DefaultClock};
use std::sync::Arc;

/// Clock trait object shared by every service.
pub type SharedClock = dyn Clock + Send + Sync;

/// Process catalogue over trait-object ports.
pub type ProcessCatalog = ProcessCatalogService<dyn ProcessRepository, SharedClock>;

/// Script service over trait-object ports.
pub type Scripts = ScriptService<dyn ScriptRepository, dyn ProcessRepository, SharedClock>;

/// Cancellation ledger over trait-object ports.
pub type CancellationLedger =
    CancellationLedgerService<dyn CanceledRequestRepository, SharedClock>;

/// Services available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Process catalogue.
    pub processes: ProcessCatalog,
    /// Script management.
    pub scripts: Scripts,
    /// Canceled-request list.
    pub cancellations: CancellationLedger,
}

impl AppState {
    /// Wires services over the given repositories.
    #[must_use]
    pub fn new(
        processes: Arc<dyn ProcessRepository>,
        scripts: Arc<dyn ScriptRepository>,
        cancellations: Arc<dyn CanceledRequestRepository>,
        clock: Arc<SharedClock>,
    ) -> Self {
        Self {
            processes: ProcessCatalogService::new(Arc::clone(&processes), Arc::clone(&clock)),
            scripts: ScriptService::new(scripts, processes, Arc::clone(&clock)),
            cancellations: CancellationLedgerService::new(cancellations, clock),
        }
    }

    /// Wires services over fresh in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryProcessRepository::new()),
            Arc::new(InMemoryScriptRepository::new()),
            Arc::new(InMemoryCanceledRequestRepository::new()),
            Arc::new(DefaultClock),
        )
    }

    /// Wires services over `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self::new(
            Arc::new(PostgresProcessRepository::new(pool.clone())),
            Arc::new(PostgresScriptRepository::new(pool.clone())),
            Arc::new(PostgresCanceledRequestRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        )
    }
}
