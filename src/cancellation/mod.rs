//! Canceled-request reporting list.
//!
//! When a running request is canceled the workflow engine records a
//! denormalised row here so reports can list cancellations per user or per
//! process without joining the live case tables. Rows are append-only:
//! they are recorded once, never updated, and removed only by purge.
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
