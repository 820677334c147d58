//! Domain model for process scripts.
//!
//! Scripts are owned by exactly one process. Titles are unique across all
//! scripts; that rule is enforced by the service and repository layers
//! because it spans aggregates.

mod error;
mod ids;
mod language;
mod script;
mod text;

pub use error::ScriptDomainError;
pub use ids::ScriptId;
pub use language::ScriptLanguage;
pub use script::{PersistedScriptData, Script, ScriptChanges, ScriptSortField};
pub use text::{ScriptDescription, ScriptTitle};
