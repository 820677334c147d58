//! Step definitions for script management scenarios.

mod given;
mod then;
mod when;
pub mod world;
