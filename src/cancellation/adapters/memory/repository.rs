//! In-memory canceled-request repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::cancellation::{
    domain::{CanceledRequest, Uid},
    ports::{
        CanceledRequestRepository, CanceledRequestRepositoryError,
        CanceledRequestRepositoryResult, CancellationListQuery, PurgeScope,
    },
};
use crate::pagination::{Page, paginate};

/// Thread-safe in-memory canceled-request repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCanceledRequestRepository {
    records: Arc<RwLock<HashMap<Uid, CanceledRequest>>>,
}

impl InMemoryCanceledRequestRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> CanceledRequestRepositoryError {
    CanceledRequestRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CanceledRequestRepository for InMemoryCanceledRequestRepository {
    async fn record(&self, request: &CanceledRequest) -> CanceledRequestRepositoryResult<()> {
        let mut records = self.records.write().map_err(lock_error)?;
        if records.contains_key(request.app_uid()) {
            return Err(CanceledRequestRepositoryError::DuplicateApplication(
                request.app_uid().clone(),
            ));
        }
        records.insert(request.app_uid().clone(), request.clone());
        Ok(())
    }

    async fn find_by_app_uid(
        &self,
        app_uid: &Uid,
    ) -> CanceledRequestRepositoryResult<Option<CanceledRequest>> {
        let records = self.records.read().map_err(lock_error)?;
        Ok(records.get(app_uid).cloned())
    }

    async fn list(
        &self,
        query: &CancellationListQuery,
    ) -> CanceledRequestRepositoryResult<Page<CanceledRequest>> {
        let records = self.records.read().map_err(lock_error)?;
        let mut matching: Vec<CanceledRequest> = records
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        matching.sort_by(CanceledRequest::listing_order);
        Ok(paginate(matching, query.page()))
    }

    async fn purge(&self, scope: &PurgeScope) -> CanceledRequestRepositoryResult<u64> {
        let mut records = self.records.write().map_err(lock_error)?;
        let before = records.len();
        match scope {
            PurgeScope::All => records.clear(),
            PurgeScope::Process(process_uid) => {
                records.retain(|_, record| !record.belongs_to_process(process_uid));
            }
        }
        let removed = before.saturating_sub(records.len());
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
