//! Field-keyed validation failures reported by application services.
//!
//! Services collect every failing field before rejecting a request so API
//! callers receive the complete set of problems in one response.

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Message used when no field-specific message is available.
const GENERIC_MESSAGE: &str = "The given data was invalid.";

/// Validation failures keyed by input field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", self.summary())]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set holding a single field failure.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Records a failure for the given field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Moves every failure from `other` into this set.
    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// Returns whether no failures have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the given field has at least one failure.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the failures recorded for a field.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the first recorded message, falling back to a generic one.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.0
            .values()
            .flat_map(|messages| messages.iter())
            .next()
            .map_or(GENERIC_MESSAGE, String::as_str)
    }

    /// Converts the collected failures into a result.
    ///
    /// # Errors
    ///
    /// Returns `self` when any failure has been recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}
