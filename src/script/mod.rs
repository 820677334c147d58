//! Script resource management for Palladio.
//!
//! Scripts are source snippets attached to a process: a unique title, a
//! language tag, a description, and the code body. This module stores and
//! validates them; it never executes them. The module follows hexagonal
//! architecture:
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
