//! Application services for the process catalogue.

mod catalog;

pub use catalog::{
    CreateProcessRequest, ProcessCatalogService, ProcessServiceError, ProcessServiceResult,
};
