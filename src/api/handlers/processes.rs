//! Process catalogue handlers.
//!
//! GET  /processes              list processes
//! POST /processes              create a process
//! GET  /processes/:process_uid read one process

use super::{ListResponse, process_id};
use crate::api::{ApiError, AppState};
use crate::pagination::{ListParams, SortField};
use crate::process::{domain::Process, services::CreateProcessRequest};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for creating a process.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessBody {
    /// Unique process name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// Process representation.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResource {
    /// Process UID.
    pub uid: String,
    /// Process name.
    pub name: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Process> for ProcessResource {
    fn from(process: Process) -> Self {
        Self {
            uid: process.id().to_string(),
            name: process.name().as_str().to_owned(),
            description: process.description().map(str::to_owned),
            created_at: process.created_at(),
        }
    }
}

/// `GET /processes`
///
/// # Errors
///
/// Returns 422 for invalid list parameters.
pub async fn list_processes(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse<ProcessResource>>, ApiError> {
    let Query(list_params) = params?;
    let (query, page) = state.processes.list(list_params).await?;
    Ok(Json(ListResponse::from_page(
        page,
        query.filter().map(str::to_owned),
        query.sort().field().as_str(),
        query.sort().order().as_str(),
        ProcessResource::from,
    )))
}

/// `POST /processes`
///
/// # Errors
///
/// Returns 422 when the name is missing or taken.
pub async fn create_process(
    State(state): State<AppState>,
    body: Result<Json<ProcessBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ProcessResource>), ApiError> {
    let Json(payload) = body?;
    let request = CreateProcessRequest::default()
        .with_name(payload.name)
        .with_description(payload.description);
    let process = state.processes.create(request).await?;
    Ok((StatusCode::CREATED, Json(process.into())))
}

/// `GET /processes/:process_uid`
///
/// # Errors
///
/// Returns 404 when the process does not exist.
pub async fn get_process(
    State(state): State<AppState>,
    Path(process_uid): Path<String>,
) -> Result<Json<ProcessResource>, ApiError> {
    let process = state.processes.get(process_id(&process_uid)?).await?;
    Ok(Json(process.into()))
}
