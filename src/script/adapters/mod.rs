//! Adapter implementations for script ports.

pub mod memory;
pub mod postgres;
