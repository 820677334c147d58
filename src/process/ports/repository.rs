//! Repository port for process persistence and lookup.

use crate::pagination::{ListQuery, Page};
use crate::process::domain::{Process, ProcessId, ProcessName, ProcessSortField};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for process repository operations.
pub type ProcessRepositoryResult<T> = Result<T, ProcessRepositoryError>;

/// List query accepted by [`ProcessRepository::list`].
pub type ProcessListQuery = ListQuery<ProcessSortField>;

/// Process persistence contract.
#[async_trait]
pub trait ProcessRepository: Send + Sync {
    /// Stores a new process.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessRepositoryError::DuplicateProcess`] when the
    /// identifier already exists or
    /// [`ProcessRepositoryError::DuplicateProcessName`] when the name is
    /// taken.
    async fn insert(&self, process: &Process) -> ProcessRepositoryResult<()>;

    /// Finds a process by identifier.
    ///
    /// Returns `None` when the process does not exist.
    async fn find_by_id(&self, id: ProcessId) -> ProcessRepositoryResult<Option<Process>>;

    /// Finds a process by its unique name.
    async fn find_by_name(&self, name: &ProcessName) -> ProcessRepositoryResult<Option<Process>>;

    /// Returns one page of processes matching the query.
    ///
    /// The filter matches name and description, ignoring case.
    async fn list(&self, query: &ProcessListQuery) -> ProcessRepositoryResult<Page<Process>>;
}

/// Errors returned by process repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProcessRepositoryError {
    /// A process with the same identifier already exists.
    #[error("duplicate process identifier: {0}")]
    DuplicateProcess(ProcessId),

    /// A process with the same name already exists.
    #[error("duplicate process name: {0}")]
    DuplicateProcessName(ProcessName),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProcessRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
