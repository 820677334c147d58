//! Adapter implementations for canceled-request ports.

pub mod memory;
pub mod postgres;
