//! Application services for script management.

mod management;

pub use management::{
    CreateScriptRequest, ScriptService, ScriptServiceError, ScriptServiceResult,
    UpdateScriptRequest,
};
