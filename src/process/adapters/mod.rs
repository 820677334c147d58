//! Adapter implementations for process catalogue ports.

pub mod memory;
pub mod postgres;
