//! Validated process name type.

use super::ProcessDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a process name, matching the `VARCHAR(255)` column.
const MAX_NAME_LENGTH: usize = 255;

/// Trimmed, non-empty process name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessName(String);

impl ProcessName {
    /// Creates a validated process name.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::EmptyName`] when the value is blank or
    /// [`ProcessDomainError::NameTooLong`] when it exceeds 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ProcessDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(ProcessDomainError::EmptyName);
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ProcessDomainError::NameTooLong);
        }
        Ok(Self(trimmed))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProcessName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
