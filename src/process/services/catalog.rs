//! Service layer for process creation and lookup.

use crate::pagination::{ListParams, ListQuery, Page};
use crate::process::{
    domain::{Process, ProcessId, ProcessName, ProcessSortField},
    ports::{ProcessRepository, ProcessRepositoryError},
};
use crate::validation::ValidationErrors;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProcessRequest {
    name: Option<String>,
    description: Option<String>,
}

impl CreateProcessRequest {
    /// Creates a request with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
        }
    }

    /// Sets the name, which may be absent in raw API input.
    #[must_use]
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }
}

/// Service-level errors for process catalogue operations.
#[derive(Debug, Error)]
pub enum ProcessServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The process does not exist.
    #[error("process not found: {0}")]
    NotFound(ProcessId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProcessRepositoryError),
}

/// Result type for process catalogue service operations.
pub type ProcessServiceResult<T> = Result<T, ProcessServiceError>;

/// Process catalogue orchestration service.
pub struct ProcessCatalogService<R, C>
where
    R: ProcessRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ProcessCatalogService<R, C>
where
    R: ProcessRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ProcessCatalogService<R, C>
where
    R: ProcessRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a new process catalogue service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a process.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessServiceError::Validation`] when the name is missing,
    /// too long, or already taken, and
    /// [`ProcessServiceError::Repository`] when persistence fails.
    pub async fn create(&self, request: CreateProcessRequest) -> ProcessServiceResult<Process> {
        let name = ProcessName::new(request.name.unwrap_or_default())
            .map_err(|err| ValidationErrors::single("name", err.to_string()))?;

        if self.repository.find_by_name(&name).await?.is_some() {
            return Err(name_taken().into());
        }

        let process = Process::new(name, request.description, &*self.clock);
        match self.repository.insert(&process).await {
            Ok(()) => {}
            Err(ProcessRepositoryError::DuplicateProcessName(_)) => {
                return Err(name_taken().into());
            }
            Err(err) => return Err(err.into()),
        }
        tracing::info!(process_id = %process.id(), name = %process.name(), "process created");
        Ok(process)
    }

    /// Finds a process by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessServiceError::NotFound`] when the process does not
    /// exist or [`ProcessServiceError::Repository`] when lookup fails.
    pub async fn get(&self, id: ProcessId) -> ProcessServiceResult<Process> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProcessServiceError::NotFound(id))
    }

    /// Lists processes.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessServiceError::Validation`] when list parameters are
    /// invalid or [`ProcessServiceError::Repository`] when lookup fails.
    pub async fn list(
        &self,
        params: ListParams,
    ) -> ProcessServiceResult<(ListQuery<ProcessSortField>, Page<Process>)> {
        let query = params.resolve::<ProcessSortField>()?;
        let page = self.repository.list(&query).await?;
        Ok((query, page))
    }
}

fn name_taken() -> ValidationErrors {
    ValidationErrors::single("name", "The name has already been taken.")
}
