//! HTTP error mapping.

use crate::cancellation::services::CancellationServiceError;
use crate::process::services::ProcessServiceError;
use crate::script::services::ScriptServiceError;
use crate::validation::ValidationErrors;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "Internal server error.";

/// Boxed error carried by [`ApiError::Internal`].
pub type InternalError = Box<dyn std::error::Error + Send + Sync>;

/// Error returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request input failed validation (422).
    #[error("{}", .0.summary())]
    Validation(ValidationErrors),

    /// The addressed resource does not exist (404).
    #[error("{0}")]
    NotFound(&'static str),

    /// Unexpected failure (500). Details are logged, never returned.
    #[error("internal error: {0}")]
    Internal(#[source] InternalError),
}

impl ApiError {
    /// Returns the response status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(errors) => json!({
                "message": errors.summary(),
                "errors": errors,
            }),
            Self::NotFound(message) => json!({ "message": message }),
            Self::Internal(err) => {
                tracing::error!(error = %err, "request failed");
                json!({ "message": INTERNAL_MESSAGE })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationErrors::single("body", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(ValidationErrors::single("query", rejection.body_text()))
    }
}

impl From<ProcessServiceError> for ApiError {
    fn from(err: ProcessServiceError) -> Self {
        match err {
            ProcessServiceError::Validation(errors) => Self::Validation(errors),
            ProcessServiceError::NotFound(_) => Self::NotFound("Process not found."),
            ProcessServiceError::Repository(source) => Self::internal(source),
        }
    }
}

impl From<ScriptServiceError> for ApiError {
    fn from(err: ScriptServiceError) -> Self {
        match err {
            ScriptServiceError::Validation(errors) => Self::Validation(errors),
            ScriptServiceError::ProcessNotFound(_) => Self::NotFound("Process not found."),
            ScriptServiceError::ScriptNotFound(_) => Self::NotFound("Script not found."),
            ScriptServiceError::Repository(source) => Self::internal(source),
            ScriptServiceError::ProcessRepository(source) => Self::internal(source),
        }
    }
}

impl From<CancellationServiceError> for ApiError {
    fn from(err: CancellationServiceError) -> Self {
        match err {
            CancellationServiceError::Validation(errors) => Self::Validation(errors),
            CancellationServiceError::NotFound(_) => {
                Self::NotFound("Canceled request not found.")
            }
            CancellationServiceError::Repository(source) => Self::internal(source),
        }
    }
}
