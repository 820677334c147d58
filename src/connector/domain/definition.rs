//! Connector definitions and their endpoints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A connector available to process models, with the endpoints it exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorDefinition {
    name: String,
    endpoints: BTreeSet<String>,
}

impl ConnectorDefinition {
    /// Creates a definition exposing the given endpoints.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            endpoints: endpoints.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the connector name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns whether the connector exposes the named endpoint.
    #[must_use]
    pub fn has_endpoint(&self, endpoint: &str) -> bool {
        self.endpoints.contains(endpoint)
    }

    /// Iterates over endpoint names in sorted order.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        self.endpoints.iter().map(String::as_str)
    }
}
