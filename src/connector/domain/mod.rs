//! Domain model for Data Connector configuration.

mod definition;
mod element;
mod error;
mod mapping;

pub use definition::ConnectorDefinition;
pub use element::{BoundDataConnector, DataConnectorElement};
pub use error::ConnectorError;
pub use mapping::{DataMapping, merge_request_data};
