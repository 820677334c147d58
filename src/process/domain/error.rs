//! Error types for process domain validation.

use thiserror::Error;

/// Errors returned while constructing process domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessDomainError {
    /// The process name is empty after trimming.
    #[error("The name field is required.")]
    EmptyName,

    /// The process name exceeds the 255-character storage limit.
    #[error("The name may not be greater than 255 characters.")]
    NameTooLong,
}
