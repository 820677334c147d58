//! In-memory script repository for tests and database-less runs.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pagination::{Page, SortOrder, compare_text, matches_filter, paginate};
use crate::process::domain::ProcessId;
use crate::script::{
    domain::{Script, ScriptId, ScriptSortField, ScriptTitle},
    ports::{ScriptListQuery, ScriptRepository, ScriptRepositoryError, ScriptRepositoryResult},
};

/// Thread-safe in-memory script repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScriptRepository {
    state: Arc<RwLock<InMemoryScriptState>>,
}

#[derive(Debug, Default)]
struct InMemoryScriptState {
    scripts: HashMap<ScriptId, Script>,
    title_index: HashMap<ScriptTitle, ScriptId>,
}

impl InMemoryScriptRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ScriptRepositoryError {
    ScriptRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn compare(left: &Script, right: &Script, field: ScriptSortField) -> Ordering {
    match field {
        ScriptSortField::Title => compare_text(left.title().as_str(), right.title().as_str()),
        ScriptSortField::Language => left.language().as_str().cmp(right.language().as_str()),
        ScriptSortField::Description => {
            compare_text(left.description().as_str(), right.description().as_str())
        }
        ScriptSortField::CreatedAt => left.created_at().cmp(&right.created_at()),
        ScriptSortField::UpdatedAt => left.updated_at().cmp(&right.updated_at()),
    }
}

#[async_trait]
impl ScriptRepository for InMemoryScriptRepository {
    async fn insert(&self, script: &Script) -> ScriptRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.scripts.contains_key(&script.id()) {
            return Err(ScriptRepositoryError::DuplicateScript(script.id()));
        }
        if state.title_index.contains_key(script.title()) {
            return Err(ScriptRepositoryError::DuplicateTitle(script.title().clone()));
        }

        state.title_index.insert(script.title().clone(), script.id());
        state.scripts.insert(script.id(), script.clone());
        Ok(())
    }

    async fn update(&self, script: &Script) -> ScriptRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        let old_title = state
            .scripts
            .get(&script.id())
            .ok_or(ScriptRepositoryError::NotFound(script.id()))?
            .title()
            .clone();

        if *script.title() != old_title {
            if let Some(&indexed_id) = state.title_index.get(script.title())
                && indexed_id != script.id()
            {
                return Err(ScriptRepositoryError::DuplicateTitle(script.title().clone()));
            }
            state.title_index.remove(&old_title);
            state.title_index.insert(script.title().clone(), script.id());
        }

        state.scripts.insert(script.id(), script.clone());
        Ok(())
    }

    async fn delete(&self, id: ScriptId) -> ScriptRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .scripts
            .remove(&id)
            .ok_or(ScriptRepositoryError::NotFound(id))?;
        state.title_index.remove(removed.title());
        Ok(())
    }

    async fn find_by_id(&self, id: ScriptId) -> ScriptRepositoryResult<Option<Script>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.scripts.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &ScriptTitle) -> ScriptRepositoryResult<Option<Script>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .title_index
            .get(title)
            .and_then(|id| state.scripts.get(id))
            .cloned())
    }

    async fn list_for_process(
        &self,
        process_id: ProcessId,
        query: &ScriptListQuery,
    ) -> ScriptRepositoryResult<Page<Script>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<Script> = state
            .scripts
            .values()
            .filter(|script| script.belongs_to(process_id))
            .filter(|script| {
                query.filter().is_none_or(|filter| {
                    matches_filter(
                        filter,
                        &[
                            script.title().as_str(),
                            script.description().as_str(),
                            script.language().as_str(),
                        ],
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
