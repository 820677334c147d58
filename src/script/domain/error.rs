//! Error types for script domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing script domain values.
///
/// Messages are phrased for API callers because they are surfaced verbatim
/// in validation responses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptDomainError {
    /// The title is empty after trimming.
    #[error("The title field is required.")]
    EmptyTitle,

    /// The title exceeds the 255-character storage limit.
    #[error("The title may not be greater than 255 characters.")]
    TitleTooLong,

    /// The description is empty after trimming.
    #[error("The description field is required.")]
    EmptyDescription,

    /// The language tag is empty after trimming.
    #[error("The language field is required.")]
    EmptyLanguage,

    /// The language tag is not one of the supported languages.
    #[error("The selected language '{0}' is invalid.")]
    UnsupportedLanguage(String),
}
