//! Script aggregate root.

use super::{ScriptDescription, ScriptId, ScriptLanguage, ScriptTitle};
use crate::pagination::SortField;
use crate::process::domain::ProcessId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A stored script owned by a process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    id: ScriptId,
    process_id: ProcessId,
    title: ScriptTitle,
    description: ScriptDescription,
    language: ScriptLanguage,
    code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedScriptData {
    /// Persisted script identifier.
    pub id: ScriptId,
    /// Persisted owning process.
    pub process_id: ProcessId,
    /// Persisted title.
    pub title: ScriptTitle,
    /// Persisted description.
    pub description: ScriptDescription,
    /// Persisted language tag.
    pub language: ScriptLanguage,
    /// Persisted source code.
    pub code: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated partial update for a script. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptChanges {
    title: Option<ScriptTitle>,
    description: Option<ScriptDescription>,
    language: Option<ScriptLanguage>,
    code: Option<String>,
}

impl ScriptChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: ScriptTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: ScriptDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the language.
    #[must_use]
    pub const fn with_language(mut self, language: ScriptLanguage) -> Self {
        self.language = Some(language);
        self
    }

    /// Replaces the code body.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Returns the new title, if one is being set.
    #[must_use]
    pub const fn title(&self) -> Option<&ScriptTitle> {
        self.title.as_ref()
    }

    /// Returns whether the change set carries no changes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.language.is_none()
            && self.code.is_none()
    }
}

impl Script {
    /// Creates a new script owned by the given process.
    #[must_use]
    pub fn new(
        process_id: ProcessId,
        title: ScriptTitle,
        description: ScriptDescription,
        language: ScriptLanguage,
        code: impl Into<String>,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ScriptId::new(),
            process_id,
            title,
            description,
            language,
            code: code.into(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a script from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedScriptData) -> Self {
        Self {
            id: data.id,
            process_id: data.process_id,
            title: data.title,
            description: data.description,
            language: data.language,
            code: data.code,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the script identifier.
    #[must_use]
    pub const fn id(&self) -> ScriptId {
        self.id
    }

    /// Returns the owning process.
    #[must_use]
    pub const fn process_id(&self) -> ProcessId {
        self.process_id
    }

    /// Returns whether the script is owned by the given process.
    #[must_use]
    pub fn belongs_to(&self, process_id: ProcessId) -> bool {
        self.process_id == process_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &ScriptTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub const fn description(&self) -> &ScriptDescription {
        &self.description
    }

    /// Returns the language tag.
    #[must_use]
    pub const fn language(&self) -> ScriptLanguage {
        self.language
    }

    /// Returns the source code body.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// The update timestamp only moves when the change set is non-empty.
    pub fn apply(&mut self, changes: ScriptChanges, clock: &(impl Clock + ?Sized)) {
        if changes.is_empty() {
            return;
        }
        let ScriptChanges {
            title,
            description,
            language,
            code,
        } = changes;
        if let Some(value) = title {
            self.title = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = language {
            self.language = value;
        }
        if let Some(value) = code {
            self.code = value;
        }
        self.updated_at = clock.utc();
    }
}

/// Fields a script listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptSortField {
    /// Sort by title.
    Title,
    /// Sort by language tag.
    Language,
    /// Sort by description.
    Description,
    /// Sort by creation time.
    CreatedAt,
    /// Sort by latest update time.
    UpdatedAt,
}

impl SortField for ScriptSortField {
    const DEFAULT: Self = Self::Title;

    fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Language => "language",
            Self::Description => "description",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "language" => Some(Self::Language),
            "description" => Some(Self::Description),
            "created_at" => Some(Self::CreatedAt),
            "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }
}
