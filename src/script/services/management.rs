//! Service layer for script creation, listing, update, and removal.
//!
//! Every operation is scoped to a process: the process must exist and the
//! script must belong to it, otherwise the script is reported as not found.

use crate::pagination::{ListParams, ListQuery, Page};
use crate::process::{
    domain::ProcessId,
    ports::{ProcessRepository, ProcessRepositoryError},
};
use crate::script::{
    domain::{
        Script, ScriptChanges, ScriptDescription, ScriptDomainError, ScriptId, ScriptLanguage,
        ScriptSortField, ScriptTitle,
    },
    ports::{ScriptRepository, ScriptRepositoryError},
};
use crate::validation::ValidationErrors;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

const TITLE_TAKEN: &str = "The title has already been taken.";

/// Request payload for creating a script.
///
/// Fields are optional because raw API input may omit them; the service
/// reports every missing required field at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateScriptRequest {
    title: Option<String>,
    description: Option<String>,
    language: Option<String>,
    code: Option<String>,
}

impl CreateScriptRequest {
    /// Creates a request with every required field set.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            language: Some(language.into()),
            code: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the language tag.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Sets the code body.
    #[must_use]
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }
}

/// Request payload for a partial script update.
///
/// Absent fields are left unchanged. A supplied title must not be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateScriptRequest {
    title: Option<String>,
    description: Option<String>,
    language: Option<String>,
    code: Option<String>,
}

impl UpdateScriptRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    /// Sets the new language tag.
    #[must_use]
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    /// Sets the new code body.
    #[must_use]
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }
}

/// Service-level errors for script operations.
#[derive(Debug, Error)]
pub enum ScriptServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The scoping process does not exist.
    #[error("process not found: {0}")]
    ProcessNotFound(ProcessId),
    /// The script does not exist within the scoping process.
    #[error("script not found: {0}")]
    ScriptNotFound(ScriptId),
    /// Script repository operation failed.
    #[error(transparent)]
    Repository(#[from] ScriptRepositoryError),
    /// Process repository operation failed.
    #[error(transparent)]
    ProcessRepository(#[from] ProcessRepositoryError),
}

/// Result type for script service operations.
pub type ScriptServiceResult<T> = Result<T, ScriptServiceError>;

/// Script management orchestration service.
pub struct ScriptService<S, P, C>
where
    S: ScriptRepository + ?Sized,
    P: ProcessRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    scripts: Arc<S>,
    processes: Arc<P>,
    clock: Arc<C>,
}

impl<S, P, C> Clone for ScriptService<S, P, C>
where
    S: ScriptRepository + ?Sized,
    P: ProcessRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            scripts: Arc::clone(&self.scripts),
            processes: Arc::clone(&self.processes),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, P, C> ScriptService<S, P, C>
where
    S: ScriptRepository + ?Sized,
    P: ProcessRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a new script service.
    #[must_use]
    pub const fn new(scripts: Arc<S>, processes: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            scripts,
            processes,
            clock,
        }
    }

    /// Creates a script within a process.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptServiceError::ProcessNotFound`] when the process does
    /// not exist, [`ScriptServiceError::Validation`] when a required field is
    /// missing, invalid, or the title is taken, and a repository error when
    /// persistence fails.
    pub async fn create(
        &self,
        process_id: ProcessId,
        request: CreateScriptRequest,
    ) -> ScriptServiceResult<Script> {
        self.require_process(process_id).await?;

        let mut errors = ValidationErrors::new();
        let parsed_title = collect(
            &mut errors,
            "title",
            ScriptTitle::new(request.title.unwrap_or_default()),
        );
        let parsed_description = collect(
            &mut errors,
            "description",
            ScriptDescription::new(request.description.unwrap_or_default()),
        );
        let parsed_language = collect(
            &mut errors,
            "language",
            ScriptLanguage::try_from(request.language.as_deref().unwrap_or_default()),
        );

        if let Some(candidate) = parsed_title.as_ref()
            && self.scripts.find_by_title(candidate).await?.is_some()
        {
            errors.add("title", TITLE_TAKEN);
        }

        let (Some(title), Some(description), Some(language)) =
            (parsed_title, parsed_description, parsed_language)
        else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let script = Script::new(
            process_id,
            title,
            description,
            language,
            request.code.unwrap_or_default(),
            &*self.clock,
        );
        self.scripts
            .insert(&script)
            .await
            .map_err(title_conflict_as_validation)?;

        tracing::info!(
            script_id = %script.id(),
            process_id = %process_id,
            title = %script.title(),
            "script created"
        );
        Ok(script)
    }

    /// Lists a process's scripts.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptServiceError::ProcessNotFound`] when the process does
    /// not exist, [`ScriptServiceError::Validation`] when list parameters are
    /// invalid, and a repository error when lookup fails.
    pub async fn list(
        &self,
        process_id: ProcessId,
        params: ListParams,
    ) -> ScriptServiceResult<(ListQuery<ScriptSortField>, Page<Script>)> {
        self.require_process(process_id).await?;
        let query = params.resolve::<ScriptSortField>()?;
        let page = self.scripts.list_for_process(process_id, &query).await?;
        Ok((query, page))
    }

    /// Returns a script scoped to a process.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptServiceError::ProcessNotFound`] or
    /// [`ScriptServiceError::ScriptNotFound`] when the process or the script
    /// within it does not exist.
    pub async fn get(
        &self,
        process_id: ProcessId,
        script_id: ScriptId,
    ) -> ScriptServiceResult<Script> {
        self.require_process(process_id).await?;
        self.require_scoped_script(process_id, script_id).await
    }

    /// Applies a partial update to a script.
    ///
    /// # Errors
    ///
    /// Returns not-found errors as for [`Self::get`],
    /// [`ScriptServiceError::Validation`] when a supplied field is invalid or
    /// the new title belongs to another script, and a repository error when
    /// persistence fails.
    pub async fn update(
        &self,
        process_id: ProcessId,
        script_id: ScriptId,
        request: UpdateScriptRequest,
    ) -> ScriptServiceResult<Script> {
        self.require_process(process_id).await?;
        let mut script = self.require_scoped_script(process_id, script_id).await?;

        let (changes, mut errors) = validate_changes(request);
        if let Some(title) = changes.title()
            && let Some(holder) = self.scripts.find_by_title(title).await?
            && holder.id() != script_id
        {
            errors.add("title", TITLE_TAKEN);
        }
        errors.into_result()?;

        if changes.is_empty() {
            tracing::debug!(script_id = %script_id, "script update carried no changes");
            return Ok(script);
        }

        script.apply(changes, &*self.clock);
        self.scripts
            .update(&script)
            .await
            .map_err(|err| match err {
                ScriptRepositoryError::NotFound(id) => ScriptServiceError::ScriptNotFound(id),
                other => title_conflict_as_validation(other),
            })?;
        tracing::info!(script_id = %script_id, "script updated");
        Ok(script)
    }

    /// Removes a script.
    ///
    /// # Errors
    ///
    /// Returns not-found errors as for [`Self::get`] and a repository error
    /// when persistence fails.
    pub async fn delete(
        &self,
        process_id: ProcessId,
        script_id: ScriptId,
    ) -> ScriptServiceResult<()> {
        self.require_process(process_id).await?;
        self.require_scoped_script(process_id, script_id).await?;
        self.scripts.delete(script_id).await.map_err(|err| match err {
            ScriptRepositoryError::NotFound(id) => ScriptServiceError::ScriptNotFound(id),
            other => other.into(),
        })?;
        tracing::info!(script_id = %script_id, process_id = %process_id, "script deleted");
        Ok(())
    }

    async fn require_process(&self, process_id: ProcessId) -> ScriptServiceResult<()> {
        match self.processes.find_by_id(process_id).await? {
            Some(_) => Ok(()),
            None => Err(ScriptServiceError::ProcessNotFound(process_id)),
        }
    }

    async fn require_scoped_script(
        &self,
        process_id: ProcessId,
        script_id: ScriptId,
    ) -> ScriptServiceResult<Script> {
        match self.scripts.find_by_id(script_id).await? {
            Some(script) if script.belongs_to(process_id) => Ok(script),
            Some(_) => {
                tracing::debug!(
                    script_id = %script_id,
                    process_id = %process_id,
                    "script requested through a process that does not own it"
                );
                Err(ScriptServiceError::ScriptNotFound(script_id))
            }
            None => Err(ScriptServiceError::ScriptNotFound(script_id)),
        }
    }
}

fn collect<T>(
    errors: &mut ValidationErrors,
    field: &str,
    result: Result<T, ScriptDomainError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.add(field, err.to_string());
            None
        }
    }
}

fn validate_changes(request: UpdateScriptRequest) -> (ScriptChanges, ValidationErrors) {
    let UpdateScriptRequest {
        title,
        description,
        language,
        code,
    } = request;

    let mut errors = ValidationErrors::new();
    let mut changes = ScriptChanges::new();
    if let Some(raw) = title
        && let Some(value) = collect(&mut errors, "title", ScriptTitle::new(raw))
    {
        changes = changes.with_title(value);
    }
    if let Some(raw) = description
        && let Some(value) = collect(&mut errors, "description", ScriptDescription::new(raw))
    {
        changes = changes.with_description(value);
    }
    if let Some(raw) = language
        && let Some(value) = collect(
            &mut errors,
            "language",
            ScriptLanguage::try_from(raw.as_str()),
        )
    {
        changes = changes.with_language(value);
    }
    if let Some(value) = code {
        changes = changes.with_code(value);
    }
    (changes, errors)
}

fn title_conflict_as_validation(err: ScriptRepositoryError) -> ScriptServiceError {
    match err {
        ScriptRepositoryError::DuplicateTitle(_) => {
            ValidationErrors::single("title", TITLE_TAKEN).into()
        }
        other => other.into(),
    }
}
