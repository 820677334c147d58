//! Domain model for the process catalogue.

mod error;
mod ids;
mod name;
mod process;

pub use error::ProcessDomainError;
pub use ids::ProcessId;
pub use name::ProcessName;
pub use process::{PersistedProcessData, Process, ProcessSortField};
