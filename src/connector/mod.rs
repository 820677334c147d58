//! Data Connector process-model element.
//!
//! A Data Connector element names a connector definition, one of that
//! definition's endpoints, and an ordered list of key/value mappings. When
//! the element runs, the mappings are merged into the request's JSON data
//! before the endpoint is called.
//!
//! Validation and merging live in [`domain`]; evaluation of the endpoint
//! call itself is owned by the workflow engine.

pub mod domain;

#[cfg(test)]
mod tests;
