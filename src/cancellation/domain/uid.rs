//! Workflow-engine UIDs.

use super::CancellationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const MAX_UID_LENGTH: usize = 32;

/// Opaque 32-character identifier assigned by the workflow engine.
///
/// Applications, processes, tasks and users all share this format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uid(String);

impl Uid {
    /// Creates a validated UID.
    ///
    /// # Errors
    ///
    /// Returns [`CancellationDomainError`] when the trimmed value is empty,
    /// longer than 32 characters, or not ASCII alphanumeric.
    pub fn new(value: impl Into<String>) -> Result<Self, CancellationDomainError> {
        let trimmed = value.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(CancellationDomainError::EmptyUid);
        }
        if trimmed.len() > MAX_UID_LENGTH {
            return Err(CancellationDomainError::UidTooLong);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CancellationDomainError::UidNotAlphanumeric);
        }
        Ok(Self(trimmed))
    }

    /// Returns the UID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Uid {
    type Error = CancellationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uid> for String {
    fn from(value: Uid) -> Self {
        value.0
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
