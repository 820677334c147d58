//! Palladio: administrative back end for a business-process-management
//! platform.
//!
//! This crate owns the relational schema and the REST surface for processes,
//! process scripts, the canceled-request reporting list, and the
//! configuration model of the Data Connector process-model element.
//!
//! # Architecture
//!
//! Palladio follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//! - **Services**: Validation and orchestration over the ports
//!
//! # Modules
//!
//! - [`process`]: Process catalogue that scopes scripts
//! - [`script`]: Script resource lifecycle (create, list, read, update, delete)
//! - [`cancellation`]: Append-only canceled-request reporting list
//! - [`connector`]: Data Connector element configuration and request-data mapping
//! - [`api`]: axum router exposing the versioned REST API
//! - [`config`]: Environment-driven server configuration
//! - [`db`]: Connection pooling and embedded schema migrations

pub mod api;
pub mod cancellation;
pub mod config;
pub mod connector;
pub mod db;
pub mod pagination;
pub mod process;
pub mod script;
pub mod validation;
