//! Errors raised while configuring or evaluating a Data Connector.

use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors returned by Data Connector operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectorError {
    /// The element configuration is incomplete or inconsistent.
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    /// Request data must be a JSON object to receive mapped keys.
    #[error("request data must be a JSON object, found {found}")]
    RequestDataNotObject {
        /// JSON type that was supplied instead.
        found: &'static str,
    },
}
