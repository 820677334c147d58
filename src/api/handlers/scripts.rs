//! Script handlers, scoped to a process.
//!
//! GET    /processes/:process_uid/scripts              list scripts
//! POST   /processes/:process_uid/scripts              create a script
//! GET    /processes/:process_uid/scripts/:script_uid  read one script
//! PUT    /processes/:process_uid/scripts/:script_uid  partial update
//! DELETE /processes/:process_uid/scripts/:script_uid  remove a script

use super::{ListResponse, process_id, script_id};
use crate::api::{ApiError, AppState};
use crate::pagination::{ListParams, SortField};
use crate::script::{
    domain::Script,
    services::{CreateScriptRequest, UpdateScriptRequest},
};
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for creating or updating a script.
///
/// On update, absent and `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScriptBody {
    /// Unique title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Language tag.
    pub language: Option<String>,
    /// Source code.
    pub code: Option<String>,
}

/// Script representation.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptResource {
    /// Script UID.
    pub uid: String,
    /// Owning process UID.
    pub process_uid: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Language tag.
    pub language: &'static str,
    /// Source code.
    pub code: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

impl From<Script> for ScriptResource {
    fn from(script: Script) -> Self {
        Self {
            uid: script.id().to_string(),
            process_uid: script.process_id().to_string(),
            title: script.title().as_str().to_owned(),
            description: script.description().as_str().to_owned(),
            language: script.language().as_str(),
            code: script.code().to_owned(),
            created_at: script.created_at(),
            updated_at: script.updated_at(),
        }
    }
}

/// Path of a single script.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptPath {
    /// Owning process UID.
    pub process_uid: String,
    /// Script UID.
    pub script_uid: String,
}

/// `GET /processes/:process_uid/scripts`
///
/// # Errors
///
/// Returns 404 for an unknown process and 422 for invalid list parameters.
pub async fn list_scripts(
    State(state): State<AppState>,
    Path(process_uid): Path<String>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListResponse<ScriptResource>>, ApiError> {
    let process = process_id(&process_uid)?;
    let Query(list_params) = params?;
    let (query, page) = state.scripts.list(process, list_params).await?;
    Ok(Json(ListResponse::from_page(
        page,
        query.filter().map(str::to_owned),
        query.sort().field().as_str(),
        query.sort().order().as_str(),
        ScriptResource::from,
    )))
}

/// `POST /processes/:process_uid/scripts`
///
/// # Errors
///
/// Returns 404 for an unknown process and 422 when a required field is
/// missing or the title is taken.
pub async fn create_script(
    State(state): State<AppState>,
    Path(process_uid): Path<String>,
    body: Result<Json<ScriptBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ScriptResource>), ApiError> {
    let process = process_id(&process_uid)?;
    let Json(payload) = body?;
    let request = CreateScriptRequest::default()
        .with_title(payload.title)
        .with_description(payload.description)
        .with_language(payload.language)
        .with_code(payload.code);
    let script = state.scripts.create(process, request).await?;
    Ok((StatusCode::CREATED, Json(script.into())))
}

/// `GET /processes/:process_uid/scripts/:script_uid`
///
/// # Errors
///
/// Returns 404 unless the script exists within the process.
pub async fn get_script(
    State(state): State<AppState>,
    Path(path): Path<ScriptPath>,
) -> Result<Json<ScriptResource>, ApiError> {
    let script = state
        .scripts
        .get(process_id(&path.process_uid)?, script_id(&path.script_uid)?)
        .await?;
    Ok(Json(script.into()))
}

/// `PUT /processes/:process_uid/scripts/:script_uid`
///
/// # Errors
///
/// Returns 404 unless the script exists within the process and 422 when a
/// supplied field is invalid.
pub async fn update_script(
    State(state): State<AppState>,
    Path(path): Path<ScriptPath>,
    body: Result<Json<ScriptBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let process = process_id(&path.process_uid)?;
    let script = script_id(&path.script_uid)?;
    let Json(payload) = body?;
    let request = UpdateScriptRequest::new()
        .with_title(payload.title)
        .with_description(payload.description)
        .with_language(payload.language)
        .with_code(payload.code);
    state.scripts.update(process, script, request).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /processes/:process_uid/scripts/:script_uid`
///
/// # Errors
///
/// Returns 404 unless the script exists within the process.
pub async fn delete_script(
    State(state): State<AppState>,
    Path(path): Path<ScriptPath>,
) -> Result<StatusCode, ApiError> {
    state
        .scripts
        .delete(process_id(&path.process_uid)?, script_id(&path.script_uid)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
