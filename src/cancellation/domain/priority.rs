//! Delegation priority levels.

use super::CancellationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority of the delegation that was active when a request was canceled.
///
/// Stored as the digit string `1` (very high) to `5` (very low).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DelegationPriority {
    /// Priority `1`.
    #[serde(rename = "1")]
    VeryHigh,
    /// Priority `2`.
    #[serde(rename = "2")]
    High,
    /// Priority `3`, the default.
    #[default]
    #[serde(rename = "3")]
    Normal,
    /// Priority `4`.
    #[serde(rename = "4")]
    Low,
    /// Priority `5`.
    #[serde(rename = "5")]
    VeryLow,
}

impl DelegationPriority {
    /// Returns the stored digit string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryHigh => "1",
            Self::High => "2",
            Self::Normal => "3",
            Self::Low => "4",
            Self::VeryLow => "5",
        }
    }
}

impl fmt::Display for DelegationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for DelegationPriority {
    type Error = CancellationDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "1" => Ok(Self::VeryHigh),
            "2" => Ok(Self::High),
            "3" => Ok(Self::Normal),
            "4" => Ok(Self::Low),
            "5" => Ok(Self::VeryLow),
            _ => Err(CancellationDomainError::InvalidPriority(value.to_owned())),
        }
    }
}
