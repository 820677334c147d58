//! Data Connector element configuration.

use super::{ConnectorDefinition, ConnectorError, DataMapping, merge_request_data};
use crate::validation::ValidationErrors;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data Connector element as configured in the process modeler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConnectorElement {
    /// Element label shown on the canvas.
    pub name: String,
    /// Selected connector definition.
    pub connector: String,
    /// Selected endpoint of that connector.
    pub endpoint: String,
    /// Ordered data-mapping rows.
    pub data_mapping: Vec<DataMapping>,
}

impl DataConnectorElement {
    /// Checks the element against the connector it selects.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::Invalid`] listing every blank field, every
    /// blank mapping key, a connector mismatch, or an endpoint the
    /// connector does not expose.
    pub fn bind(
        mut self,
        definition: &ConnectorDefinition,
    ) -> Result<BoundDataConnector<'_>, ConnectorError> {
        let mut errors = ValidationErrors::new();

        for (field, value) in [
            ("name", &self.name),
            ("connector", &self.connector),
            ("endpoint", &self.endpoint),
        ] {
            if value.trim().is_empty() {
                errors.add(field, format!("The {field} field is required."));
            }
        }
        if !self.connector.trim().is_empty() && self.connector.trim() != definition.name() {
            errors.add(
                "connector",
                format!("The connector '{}' is not available.", self.connector.trim()),
            );
        }
        if !self.endpoint.trim().is_empty() && !definition.has_endpoint(self.endpoint.trim()) {
            errors.add(
                "endpoint",
                format!(
                    "The endpoint '{}' is not defined by connector '{}'.",
                    self.endpoint.trim(),
                    definition.name()
                ),
            );
        }
        for (position, mapping) in self.data_mapping.iter().enumerate() {
            if mapping.key.trim().is_empty() {
                errors.add(
                    format!("data_mapping.{position}.key"),
                    "The data mapping key field is required.",
                );
            }
        }

        errors.into_result()?;
        for mapping in &mut self.data_mapping {
            mapping.key = mapping.key.trim().to_owned();
        }
        Ok(BoundDataConnector {
            element: self,
            definition,
        })
    }
}

/// A validated element bound to its connector definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundDataConnector<'a> {
    element: DataConnectorElement,
    definition: &'a ConnectorDefinition,
}

impl BoundDataConnector<'_> {
    /// Returns the bound element, with mapping keys trimmed.
    #[must_use]
    pub const fn element(&self) -> &DataConnectorElement {
        &self.element
    }

    /// Returns the selected connector definition.
    #[must_use]
    pub const fn definition(&self) -> &ConnectorDefinition {
        self.definition
    }

    /// Returns the selected endpoint name.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.element.endpoint.trim()
    }

    /// Produces the request data sent to the endpoint.
    ///
    /// `Null` is treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectorError::RequestDataNotObject`] when `data` is any
    /// other non-object value.
    pub fn request_data(&self, data: Value) -> Result<Value, ConnectorError> {
        let mut object = match data {
            Value::Object(map) => map,
            Value::Null => serde_json::Map::new(),
            other => {
                return Err(ConnectorError::RequestDataNotObject {
                    found: json_type(&other),
                });
            }
        };
        merge_request_data(&mut object, &self.element.data_mapping);
        tracing::debug!(
            connector = self.definition.name(),
            endpoint = self.endpoint(),
            keys = object.len(),
            "request data mapped"
        );
        Ok(Value::Object(object))
    }
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
