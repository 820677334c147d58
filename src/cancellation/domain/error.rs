//! Error types for canceled-request domain values.

use thiserror::Error;

/// Errors returned while constructing canceled-request domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CancellationDomainError {
    /// The UID is empty after trimming.
    #[error("The UID must not be empty.")]
    EmptyUid,

    /// The UID exceeds 32 characters.
    #[error("The UID may not be greater than 32 characters.")]
    UidTooLong,

    /// The UID contains characters other than ASCII letters and digits.
    #[error("The UID may only contain letters and numbers.")]
    UidNotAlphanumeric,

    /// The priority is not one of `1` to `5`.
    #[error("The selected priority '{0}' is invalid.")]
    InvalidPriority(String),
}
