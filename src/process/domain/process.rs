//! Process aggregate root.

use super::{ProcessId, ProcessName};
use crate::pagination::SortField;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Administrative record of a modeled business process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    id: ProcessId,
    name: ProcessName,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProcessData {
    /// Persisted process identifier.
    pub id: ProcessId,
    /// Persisted process name.
    pub name: ProcessName,
    /// Persisted free-text description.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Process {
    /// Creates a new process record. Blank descriptions are dropped.
    #[must_use]
    pub fn new(
        name: ProcessName,
        description: Option<String>,
        clock: &(impl Clock + ?Sized),
    ) -> Self {
        let description = description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        Self {
            id: ProcessId::new(),
            name,
            description,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a process from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProcessData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the process identifier.
    #[must_use]
    pub const fn id(&self) -> ProcessId {
        self.id
    }

    /// Returns the process name.
    #[must_use]
    pub const fn name(&self) -> &ProcessName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Fields a process listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessSortField {
    /// Sort by name.
    Name,
    /// Sort by creation time.
    CreatedAt,
}

impl SortField for ProcessSortField {
    const DEFAULT: Self = Self::Name;

    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}
