//! Port contracts for the process catalogue.
//!
//! Ports define infrastructure-agnostic interfaces used by process services.

pub mod repository;

pub use repository::{
    ProcessListQuery, ProcessRepository, ProcessRepositoryError, ProcessRepositoryResult,
};
