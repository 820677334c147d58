//! Validated text fields of a script.

use super::ScriptDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a title, matching the `VARCHAR(255)` column.
const MAX_TITLE_LENGTH: usize = 255;

/// Trimmed, non-empty script title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptTitle(String);

impl ScriptTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptDomainError::EmptyTitle`] when the value is blank or
    /// [`ScriptDomainError::TitleTooLong`] when it exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ScriptDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ScriptDomainError::EmptyTitle);
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(ScriptDomainError::TitleTooLong);
        }
        Ok(Self(trimmed))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty script description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptDescription(String);

impl ScriptDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptDomainError::EmptyDescription`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, ScriptDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ScriptDomainError::EmptyDescription);
        }
        Ok(Self(trimmed))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
