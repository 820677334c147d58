//! Canceled-request list handlers.
//!
//! GET    /canceled-requests          list, newest cancellation first
//! POST   /canceled-requests          record a cancellation
//! GET    /canceled-requests/:app_uid read one record
//! DELETE /canceled-requests          purge all, or one process's records

use super::ListResponse;
use crate::api::{ApiError, AppState};
use crate::cancellation::{
    domain::CanceledRequest,
    services::{CancellationListParams, RecordCancellationRequest},
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Canceled-request representation, one field per `list_canceled` column.
#[derive(Debug, Clone, Serialize)]
pub struct CanceledRequestResource {
    /// Application UID.
    pub app_uid: String,
    /// User owning the list entry.
    pub usr_uid: String,
    /// Task UID.
    pub tas_uid: String,
    /// Process UID.
    pub pro_uid: String,
    /// Case number.
    pub app_number: u32,
    /// Case title.
    pub app_title: String,
    /// Process title.
    pub app_pro_title: String,
    /// Task title.
    pub app_tas_title: String,
    /// Cancellation time.
    pub app_canceled_date: Option<DateTime<Utc>>,
    /// Delegation index.
    pub del_index: u32,
    /// Previous delegate UID, empty when none.
    pub del_previous_usr_uid: String,
    /// Current delegate username.
    pub del_current_usr_username: String,
    /// Current delegate first name.
    pub del_current_usr_firstname: String,
    /// Current delegate last name.
    pub del_current_usr_lastname: String,
    /// Delegation time.
    pub del_delegate_date: DateTime<Utc>,
    /// Delegation start time.
    pub del_init_date: Option<DateTime<Utc>>,
    /// Delegation due time.
    pub del_due_date: Option<DateTime<Utc>>,
    /// Priority digit.
    pub del_priority: &'static str,
    /// Numeric process identifier.
    pub pro_id: u32,
    /// Numeric user identifier.
    pub usr_id: u32,
    /// Numeric task identifier.
    pub tas_id: u32,
}

impl From<CanceledRequest> for CanceledRequestResource {
    fn from(record: CanceledRequest) -> Self {
        let CanceledRequest {
            application,
            process,
            task,
            user,
            delegation,
            canceled_at,
        } = record;
        Self {
            app_uid: application.uid.into(),
            usr_uid: user.uid.into(),
            tas_uid: task.uid.into(),
            pro_uid: process.uid.into(),
            app_number: application.number.get(),
            app_title: application.title,
            app_pro_title: process.title,
            app_tas_title: task.title,
            app_canceled_date: canceled_at,
            del_index: delegation.index.get(),
            del_previous_usr_uid: delegation
                .previous_user_uid
                .map(String::from)
                .unwrap_or_default(),
            del_current_usr_username: delegation.current_user.username,
            del_current_usr_firstname: delegation.current_user.first_name,
            del_current_usr_lastname: delegation.current_user.last_name,
            del_delegate_date: delegation.delegated_at,
            del_init_date: delegation.initiated_at,
            del_due_date: delegation.due_at,
            del_priority: delegation.priority.as_str(),
            pro_id: process.id,
            usr_id: user.id,
            tas_id: task.id,
        }
    }
}

/// Query string of the purge route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurgeParams {
    /// Restrict the purge to one process.
    pub process_uid: Option<String>,
}

/// `GET /canceled-requests`
///
/// # Errors
///
/// Returns 422 for malformed filters or page parameters.
pub async fn list_canceled_requests(
    State(state): State<AppState>,
    params: Result<Query<CancellationListParams>, QueryRejection>,
) -> Result<Json<ListResponse<CanceledRequestResource>>, ApiError> {
    let Query(list_params) = params?;
    let (_, page) = state.cancellations.list(list_params).await?;
    Ok(Json(ListResponse::from_page(
        page,
        None,
        "app_canceled_date",
        "desc",
        CanceledRequestResource::from,
    )))
}

/// `POST /canceled-requests`
///
/// # Errors
///
/// Returns 422 when a field is invalid or the application is already
/// recorded.
pub async fn record_canceled_request(
    State(state): State<AppState>,
    body: Result<Json<RecordCancellationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CanceledRequestResource>), ApiError> {
    let Json(request) = body?;
    let record = state.cancellations.record(request).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// `GET /canceled-requests/:app_uid`
///
/// # Errors
///
/// Returns 404 when no record exists.
pub async fn get_canceled_request(
    State(state): State<AppState>,
    Path(app_uid): Path<String>,
) -> Result<Json<CanceledRequestResource>, ApiError> {
    let record = state.cancellations.find(&app_uid).await?;
    Ok(Json(record.into()))
}

/// `DELETE /canceled-requests`
///
/// # Errors
///
/// Returns 422 when `process_uid` is malformed.
pub async fn purge_canceled_requests(
    State(state): State<AppState>,
    params: Result<Query<PurgeParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(purge) = params?;
    let purged = state
        .cancellations
        .purge(purge.process_uid.as_deref())
        .await?;
    Ok(Json(json!({ "purged": purged })))
}
