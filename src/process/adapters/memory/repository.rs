//! In-memory process repository for tests and database-less runs.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pagination::{Page, SortOrder, compare_text, matches_filter, paginate};
use crate::process::{
    domain::{Process, ProcessId, ProcessName, ProcessSortField},
    ports::{ProcessListQuery, ProcessRepository, ProcessRepositoryError, ProcessRepositoryResult},
};

/// Thread-safe in-memory process repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessRepository {
    state: Arc<RwLock<InMemoryProcessState>>,
}

#[derive(Debug, Default)]
struct InMemoryProcessState {
    processes: HashMap<ProcessId, Process>,
    name_index: HashMap<ProcessName, ProcessId>,
}

impl InMemoryProcessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ProcessRepositoryError {
    ProcessRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn compare(left: &Process, right: &Process, field: ProcessSortField) -> Ordering {
    match field {
        ProcessSortField::Name => compare_text(left.name().as_str(), right.name().as_str()),
        ProcessSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
    }
}

#[async_trait]
impl ProcessRepository for InMemoryProcessRepository {
    async fn insert(&self, process: &Process) -> ProcessRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.processes.contains_key(&process.id()) {
            return Err(ProcessRepositoryError::DuplicateProcess(process.id()));
        }
        if state.name_index.contains_key(process.name()) {
            return Err(ProcessRepositoryError::DuplicateProcessName(
                process.name().clone(),
            ));
        }

        state
            .name_index
            .insert(process.name().clone(), process.id());
        state.processes.insert(process.id(), process.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProcessId) -> ProcessRepositoryResult<Option<Process>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.processes.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &ProcessName) -> ProcessRepositoryResult<Option<Process>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .name_index
            .get(name)
            .and_then(|id| state.processes.get(id))
            .cloned())
    }

    async fn list(&self, query: &ProcessListQuery) -> ProcessRepositoryResult<Page<Process>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Process> = state
            .processes
            .values()
            .filter(|process| {
                query.filter().is_none_or(|filter| {
                    matches_filter(
                        filter,
                        &[process.name().as_str(), process.description().unwrap_or("")],
                    )
                })
            })
            .cloned()
            .collect();

        let sort = query.sort();
        matching.sort_by(|left, right| {
            let ordering = compare(left, right, sort.field());
            let directed = match sort.order() {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            directed.then_with(|| left.id().into_inner().cmp(&right.id().into_inner()))
        });

        Ok(paginate(matching, query.page()))
    }
}
