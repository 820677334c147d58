//! Repository port for canceled-request persistence.

use crate::cancellation::domain::{CanceledRequest, Uid};
use crate::pagination::{Page, PageRequest};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for canceled-request repository operations.
pub type CanceledRequestRepositoryResult<T> = Result<T, CanceledRequestRepositoryError>;

/// Selection criteria for listing canceled requests.
///
/// Results are always ordered by cancellation time, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancellationListQuery {
    user_uid: Option<Uid>,
    process_uid: Option<Uid>,
    page: PageRequest,
}

impl CancellationListQuery {
    /// Creates an unfiltered query for the given page.
    #[must_use]
    pub const fn new(page: PageRequest) -> Self {
        Self {
            user_uid: None,
            process_uid: None,
            page,
        }
    }

    /// Restricts results to one user's list.
    #[must_use]
    pub fn for_user(mut self, user_uid: Uid) -> Self {
        self.user_uid = Some(user_uid);
        self
    }

    /// Restricts results to one process.
    #[must_use]
    pub fn for_process(mut self, process_uid: Uid) -> Self {
        self.process_uid = Some(process_uid);
        self
    }

    /// Returns the user filter.
    #[must_use]
    pub const fn user_uid(&self) -> Option<&Uid> {
        self.user_uid.as_ref()
    }

    /// Returns the process filter.
    #[must_use]
    pub const fn process_uid(&self) -> Option<&Uid> {
        self.process_uid.as_ref()
    }

    /// Returns the requested page.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }

    /// Returns whether a record satisfies the filters.
    #[must_use]
    pub fn matches(&self, record: &CanceledRequest) -> bool {
        self.user_uid.as_ref().is_none_or(|uid| record.listed_for(uid))
            && self
                .process_uid
                .as_ref()
                .is_none_or(|uid| record.belongs_to_process(uid))
    }
}

/// Which records a purge removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeScope {
    /// Every record.
    All,
    /// Records of one process.
    Process(Uid),
}

/// Canceled-request persistence contract.
///
/// There is deliberately no update operation: records are immutable once
/// written.
#[async_trait]
pub trait CanceledRequestRepository: Send + Sync {
    /// Stores a new record.
    ///
    /// # Errors
    ///
    /// Returns [`CanceledRequestRepositoryError::DuplicateApplication`] when
    /// the application has already been recorded.
    async fn record(&self, request: &CanceledRequest) -> CanceledRequestRepositoryResult<()>;

    /// Finds the record for an application.
    async fn find_by_app_uid(
        &self,
        app_uid: &Uid,
    ) -> CanceledRequestRepositoryResult<Option<CanceledRequest>>;

    /// Returns one page of records matching the query.
    async fn list(
        &self,
        query: &CancellationListQuery,
    ) -> CanceledRequestRepositoryResult<Page<CanceledRequest>>;

    /// Removes records in scope and returns how many were removed.
    async fn purge(&self, scope: &PurgeScope) -> CanceledRequestRepositoryResult<u64>;
}

/// Errors returned by canceled-request repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CanceledRequestRepositoryError {
    /// The application already has a record.
    #[error("application already recorded as canceled: {0}")]
    DuplicateApplication(Uid),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CanceledRequestRepositoryError {
    /// Wraps a data-quality or deserialization error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
