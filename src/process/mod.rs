//! Process catalogue for Palladio.
//!
//! Processes are the modeled business processes that own scripts. This
//! module only manages their administrative records; model evaluation lives
//! elsewhere. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
