//! Unit tests for Data Connector configuration.
