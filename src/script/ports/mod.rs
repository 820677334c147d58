//! Port contracts for script persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by script services.

pub mod repository;

pub use repository::{
    ScriptListQuery, ScriptRepository, ScriptRepositoryError, ScriptRepositoryResult,
};
