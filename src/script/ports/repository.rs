//! Repository port for script persistence, lookup, and listing.

use crate::pagination::{ListQuery, Page};
use crate::process::domain::ProcessId;
use crate::script::domain::{Script, ScriptId, ScriptSortField, ScriptTitle};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for script repository operations.
pub type ScriptRepositoryResult<T> = Result<T, ScriptRepositoryError>;

/// List query accepted by [`ScriptRepository::list_for_process`].
pub type ScriptListQuery = ListQuery<ScriptSortField>;

/// Script persistence contract.
#[async_trait]
pub trait ScriptRepository: Send + Sync {
    /// Stores a new script.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptRepositoryError::DuplicateScript`] when the identifier
    /// already exists or [`ScriptRepositoryError::DuplicateTitle`] when the
    /// title is taken by another script.
    async fn insert(&self, script: &Script) -> ScriptRepositoryResult<()>;

    /// Persists changes to an existing script.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptRepositoryError::NotFound`] when the script does not
    /// exist or [`ScriptRepositoryError::DuplicateTitle`] when the new title
    /// is taken by another script.
    async fn update(&self, script: &Script) -> ScriptRepositoryResult<()>;

    /// Removes a script.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptRepositoryError::NotFound`] when the script does not
    /// exist.
    async fn delete(&self, id: ScriptId) -> ScriptRepositoryResult<()>;

    /// Finds a script by identifier, regardless of owning process.
    async fn find_by_id(&self, id: ScriptId) -> ScriptRepositoryResult<Option<Script>>;

    /// Finds a script by its unique title.
    async fn find_by_title(&self, title: &ScriptTitle) -> ScriptRepositoryResult<Option<Script>>;

    /// Returns one page of the given process's scripts matching the query.
    ///
    /// The filter matches title, description, and language, ignoring case.
    async fn list_for_process(
        &self,
        process_id: ProcessId,
        query: &ScriptListQuery,
    ) -> ScriptRepositoryResult<Page<Script>>;
}

/// Errors returned by script repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ScriptRepositoryError {
    /// A script with the same identifier already exists.
    #[error("duplicate script identifier: {0}")]
    DuplicateScript(ScriptId),

    /// Another script already uses the title.
    #[error("duplicate script title: {0}")]
    DuplicateTitle(ScriptTitle),

    /// The script was not found.
    #[error("script not found: {0}")]
    NotFound(ScriptId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ScriptRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
