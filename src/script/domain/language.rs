//! Script language tags.

use super::ScriptDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Language a script body is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptLanguage {
    /// PHP.
    Php,
    /// Lua.
    Lua,
    /// JavaScript.
    Javascript,
    /// Python.
    Python,
}

impl ScriptLanguage {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Php => "php",
            Self::Lua => "lua",
            Self::Javascript => "javascript",
            Self::Python => "python",
        }
    }
}

impl fmt::Display for ScriptLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ScriptLanguage {
    type Error = ScriptDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => Err(ScriptDomainError::EmptyLanguage),
            "php" => Ok(Self::Php),
            "lua" => Ok(Self::Lua),
            "javascript" => Ok(Self::Javascript),
            "python" => Ok(Self::Python),
            _ => Err(ScriptDomainError::UnsupportedLanguage(value.to_owned())),
        }
    }
}
