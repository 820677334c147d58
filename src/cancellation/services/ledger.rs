//! Recording, lookup, listing and purging of canceled requests.

use crate::cancellation::{
    domain::{
        ApplicationRef, CanceledRequest, CurrentDelegate, Delegation, DelegationPriority,
        MAX_NAME_LENGTH, MAX_TITLE_LENGTH, MAX_USERNAME_LENGTH, Uid, UserRef, WorkflowRef,
    },
    ports::{
        CanceledRequestRepository, CanceledRequestRepositoryError, CancellationListQuery,
        PurgeScope,
    },
};
use crate::pagination::{Page, PageRequest, resolve_page};
use crate::validation::ValidationErrors;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use thiserror::Error;

const ALREADY_RECORDED: &str = "The application has already been recorded as canceled.";

/// Largest value accepted for numeric engine identifiers (`INTEGER` column).
const MAX_NUMERIC_ID: u32 = i32::MAX.unsigned_abs();

/// Payload for recording a canceled request.
///
/// Field names follow the `list_canceled` columns. `app_uid`, `app_number`,
/// `pro_uid`, `tas_uid`, `usr_uid`, `del_index` and `del_delegate_date` are
/// required; the rest default to empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecordCancellationRequest {
    /// Application UID.
    pub app_uid: Option<String>,
    /// Case number, at least 1.
    pub app_number: Option<u32>,
    /// Case title.
    pub app_title: Option<String>,
    /// Process UID.
    pub pro_uid: Option<String>,
    /// Numeric process identifier.
    pub pro_id: Option<u32>,
    /// Process title.
    pub app_pro_title: Option<String>,
    /// Task UID.
    pub tas_uid: Option<String>,
    /// Numeric task identifier.
    pub tas_id: Option<u32>,
    /// Task title.
    pub app_tas_title: Option<String>,
    /// UID of the user owning the list entry.
    pub usr_uid: Option<String>,
    /// Numeric user identifier.
    pub usr_id: Option<u32>,
    /// Delegation index, at least 1.
    pub del_index: Option<u32>,
    /// Previous delegate UID.
    pub del_previous_usr_uid: Option<String>,
    /// Current delegate username.
    pub del_current_usr_username: Option<String>,
    /// Current delegate first name.
    pub del_current_usr_firstname: Option<String>,
    /// Current delegate last name.
    pub del_current_usr_lastname: Option<String>,
    /// Delegation time.
    pub del_delegate_date: Option<DateTime<Utc>>,
    /// Delegation start time.
    pub del_init_date: Option<DateTime<Utc>>,
    /// Delegation due time.
    pub del_due_date: Option<DateTime<Utc>>,
    /// Priority digit `1` to `5`; defaults to `3`.
    pub del_priority: Option<String>,
    /// Cancellation time; defaults to now.
    pub app_canceled_date: Option<DateTime<Utc>>,
}

/// Raw listing parameters for the canceled-request list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CancellationListParams {
    /// Restrict to one user's entries.
    pub user_uid: Option<String>,
    /// Restrict to one process.
    pub process_uid: Option<String>,
    /// Page size. Blank values count as unset.
    pub per_page: Option<String>,
    /// One-based page number. Blank values count as unset.
    #[serde(alias = "page")]
    pub current_page: Option<String>,
}

/// Errors returned by the cancellation ledger service.
#[derive(Debug, Error)]
pub enum CancellationServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// No record exists for the application.
    #[error("canceled request not found: {0}")]
    NotFound(String),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CanceledRequestRepositoryError),
}

/// Result type for cancellation ledger operations.
pub type CancellationServiceResult<T> = Result<T, CancellationServiceError>;

/// Service owning the canceled-request list.
pub struct CancellationLedgerService<R, C>
where
    R: CanceledRequestRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for CancellationLedgerService<R, C>
where
    R: CanceledRequestRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> CancellationLedgerService<R, C>
where
    R: CanceledRequestRepository + ?Sized,
    C: Clock + Send + Sync + ?Sized,
{
    /// Creates a new ledger service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Records a canceled request.
    ///
    /// The cancellation time defaults to the current clock time.
    ///
    /// # Errors
    ///
    /// Returns [`CancellationServiceError::Validation`] when a field is
    /// missing or invalid, or when the application is already recorded.
    pub async fn record(
        &self,
        request: RecordCancellationRequest,
    ) -> CancellationServiceResult<CanceledRequest> {
        let mut record = validate_record(request)?;
        record.canceled_at.get_or_insert_with(|| self.clock.utc());

        if self
            .repository
            .find_by_app_uid(record.app_uid())
            .await?
            .is_some()
        {
            return Err(ValidationErrors::single("app_uid", ALREADY_RECORDED).into());
        }

        self.repository
            .record(&record)
            .await
            .map_err(|err| match err {
                CanceledRequestRepositoryError::DuplicateApplication(_) => {
                    ValidationErrors::single("app_uid", ALREADY_RECORDED).into()
                }
                other => CancellationServiceError::Repository(other),
            })?;

        tracing::info!(
            app_uid = %record.app_uid(),
            process_uid = %record.process.uid,
            user_uid = %record.user.uid,
            "canceled request recorded"
        );
        Ok(record)
    }

    /// Returns the record for an application.
    ///
    /// # Errors
    ///
    /// Returns [`CancellationServiceError::NotFound`] when no record exists,
    /// including when `app_uid` is not a well-formed UID.
    pub async fn find(&self, app_uid: &str) -> CancellationServiceResult<CanceledRequest> {
        let Ok(uid) = Uid::new(app_uid) else {
            return Err(CancellationServiceError::NotFound(app_uid.to_owned()));
        };
        self.repository
            .find_by_app_uid(&uid)
            .await?
            .ok_or_else(|| CancellationServiceError::NotFound(app_uid.to_owned()))
    }

    /// Lists records, newest cancellation first.
    ///
    /// # Errors
    ///
    /// Returns [`CancellationServiceError::Validation`] when a filter UID or
    /// page parameter is invalid.
    pub async fn list(
        &self,
        params: CancellationListParams,
    ) -> CancellationServiceResult<(CancellationListQuery, Page<CanceledRequest>)> {
        let query = resolve_list_params(params)?;
        let page = self.repository.list(&query).await?;
        Ok((query, page))
    }

    /// Removes every record, or only those of one process.
    ///
    /// # Errors
    ///
    /// Returns [`CancellationServiceError::Validation`] when `process_uid`
    /// is not a well-formed UID.
    pub async fn purge(&self, process_uid: Option<&str>) -> CancellationServiceResult<u64> {
        let scope = match process_uid {
            None => PurgeScope::All,
            Some(raw) => PurgeScope::Process(
                Uid::new(raw)
                    .map_err(|err| ValidationErrors::single("process_uid", err.to_string()))?,
            ),
        };
        let removed = self.repository.purge(&scope).await?;
        tracing::warn!(?scope, removed, "canceled requests purged");
        Ok(removed)
    }
}

fn resolve_list_params(
    params: CancellationListParams,
) -> Result<CancellationListQuery, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let user_uid = optional_uid(&mut errors, "user_uid", params.user_uid);
    let process_uid = optional_uid(&mut errors, "process_uid", params.process_uid);
    let page = match resolve_page(params.current_page.as_deref(), params.per_page.as_deref()) {
        Ok(page) => page,
        Err(page_errors) => {
            errors.merge(page_errors);
            PageRequest::default()
        }
    };
    errors.into_result()?;

    let mut query = CancellationListQuery::new(page);
    if let Some(uid) = user_uid {
        query = query.for_user(uid);
    }
    if let Some(uid) = process_uid {
        query = query.for_process(uid);
    }
    Ok(query)
}

fn optional_uid(errors: &mut ValidationErrors, field: &str, raw: Option<String>) -> Option<Uid> {
    let value = raw.filter(|value| !value.trim().is_empty())?;
    match Uid::new(value) {
        Ok(uid) => Some(uid),
        Err(err) => {
            errors.add(field, err.to_string());
            None
        }
    }
}

fn required_uid(errors: &mut ValidationErrors, field: &str, raw: Option<String>) -> Option<Uid> {
    let value = raw.unwrap_or_default();
    if value.trim().is_empty() {
        errors.add(field, format!("The {field} field is required."));
        return None;
    }
    match Uid::new(value) {
        Ok(uid) => Some(uid),
        Err(err) => {
            errors.add(field, err.to_string());
            None
        }
    }
}

fn positive(errors: &mut ValidationErrors, field: &str, raw: Option<u32>) -> Option<NonZeroU32> {
    let Some(value) = raw else {
        errors.add(field, format!("The {field} field is required."));
        return None;
    };
    let number = NonZeroU32::new(value);
    if number.is_none() {
        errors.add(field, format!("The {field} must be at least 1."));
    }
    within_column(errors, field, value);
    number
}

fn numeric_id(errors: &mut ValidationErrors, field: &str, raw: Option<u32>) -> u32 {
    let value = raw.unwrap_or_default();
    within_column(errors, field, value);
    value
}

fn within_column(errors: &mut ValidationErrors, field: &str, value: u32) {
    if value > MAX_NUMERIC_ID {
        errors.add(
            field,
            format!("The {field} may not be greater than {MAX_NUMERIC_ID}."),
        );
    }
}

fn bounded_text(
    errors: &mut ValidationErrors,
    field: &str,
    raw: Option<String>,
    max: usize,
) -> String {
    let value = raw.map(|text| text.trim().to_owned()).unwrap_or_default();
    if value.chars().count() > max {
        errors.add(
            field,
            format!("The {field} may not be greater than {max} characters."),
        );
    }
    value
}

fn validate_record(
    request: RecordCancellationRequest,
) -> Result<CanceledRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let parsed_app_uid = required_uid(&mut errors, "app_uid", request.app_uid);
    let parsed_app_number = positive(&mut errors, "app_number", request.app_number);
    let app_title = bounded_text(&mut errors, "app_title", request.app_title, MAX_TITLE_LENGTH);
    let parsed_pro_uid = required_uid(&mut errors, "pro_uid", request.pro_uid);
    let pro_id = numeric_id(&mut errors, "pro_id", request.pro_id);
    let pro_title = bounded_text(
        &mut errors,
        "app_pro_title",
        request.app_pro_title,
        MAX_TITLE_LENGTH,
    );
    let parsed_tas_uid = required_uid(&mut errors, "tas_uid", request.tas_uid);
    let tas_id = numeric_id(&mut errors, "tas_id", request.tas_id);
    let tas_title = bounded_text(
        &mut errors,
        "app_tas_title",
        request.app_tas_title,
        MAX_TITLE_LENGTH,
    );
    let parsed_usr_uid = required_uid(&mut errors, "usr_uid", request.usr_uid);
    let usr_id = numeric_id(&mut errors, "usr_id", request.usr_id);
    let parsed_del_index = positive(&mut errors, "del_index", request.del_index);
    let previous_user_uid = optional_uid(
        &mut errors,
        "del_previous_usr_uid",
        request.del_previous_usr_uid,
    );
    let current_user = CurrentDelegate {
        username: bounded_text(
            &mut errors,
            "del_current_usr_username",
            request.del_current_usr_username,
            MAX_USERNAME_LENGTH,
        ),
        first_name: bounded_text(
            &mut errors,
            "del_current_usr_firstname",
            request.del_current_usr_firstname,
            MAX_NAME_LENGTH,
        ),
        last_name: bounded_text(
            &mut errors,
            "del_current_usr_lastname",
            request.del_current_usr_lastname,
            MAX_NAME_LENGTH,
        ),
    };
    if request.del_delegate_date.is_none() {
        errors.add("del_delegate_date", "The del_delegate_date field is required.");
    }
    let parsed_priority = match request.del_priority.as_deref().map(str::trim) {
        None | Some("") => Some(DelegationPriority::default()),
        Some(raw) => match DelegationPriority::try_from(raw) {
            Ok(level) => Some(level),
            Err(err) => {
                errors.add("del_priority", err.to_string());
                None
            }
        },
    };

    let (
        Some(app_uid),
        Some(app_number),
        Some(pro_uid),
        Some(tas_uid),
        Some(usr_uid),
        Some(del_index),
        Some(delegated_at),
        Some(priority),
    ) = (
        parsed_app_uid,
        parsed_app_number,
        parsed_pro_uid,
        parsed_tas_uid,
        parsed_usr_uid,
        parsed_del_index,
        request.del_delegate_date,
        parsed_priority,
    )
    else {
        return Err(errors);
    };
    errors.into_result()?;

    Ok(CanceledRequest {
        application: ApplicationRef {
            uid: app_uid,
            number: app_number,
            title: app_title,
        },
        process: WorkflowRef {
            uid: pro_uid,
            id: pro_id,
            title: pro_title,
        },
        task: WorkflowRef {
            uid: tas_uid,
            id: tas_id,
            title: tas_title,
        },
        user: UserRef {
            uid: usr_uid,
            id: usr_id,
        },
        delegation: Delegation {
            index: del_index,
            previous_user_uid,
            current_user,
            delegated_at,
            initiated_at: request.del_init_date,
            due_at: request.del_due_date,
            priority,
        },
        canceled_at: request.app_canceled_date,
    })
}
