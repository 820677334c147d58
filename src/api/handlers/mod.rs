//! Route handlers and their wire representations.

pub mod cancellations;
pub mod health;
pub mod processes;
pub mod scripts;

use crate::api::ApiError;
use crate::pagination::Page;
use crate::process::domain::ProcessId;
use crate::script::domain::ScriptId;
use serde::Serialize;

/// Envelope for paginated list responses.
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// Pagination and query metadata.
    pub meta: ListMeta,
}

/// Metadata returned with every list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListMeta {
    /// Records matching the filter.
    pub total: u64,
    /// Records on this page.
    pub count: usize,
    /// Page size.
    pub per_page: u32,
    /// One-based page number.
    pub current_page: u32,
    /// Number of pages, at least 1.
    pub total_pages: u64,
    /// Applied free-text filter.
    pub filter: Option<String>,
    /// Applied sort field.
    pub sort_by: &'static str,
    /// Applied sort direction.
    pub sort_order: &'static str,
}

impl<T> ListResponse<T> {
    /// Builds a response from a page, converting each record.
    pub fn from_page<U>(
        page: Page<U>,
        filter: Option<String>,
        sort_by: &'static str,
        sort_order: &'static str,
        convert: impl FnMut(U) -> T,
    ) -> Self {
        let meta = ListMeta {
            total: page.total(),
            count: page.count(),
            per_page: page.request().per_page(),
            current_page: page.request().current_page(),
            total_pages: page.total_pages(),
            filter,
            sort_by,
            sort_order,
        };
        Self {
            data: page.into_items().into_iter().map(convert).collect(),
            meta,
        }
    }
}

/// Parses a process UID path segment. Malformed UIDs name no resource.
pub(crate) fn process_id(raw: &str) -> Result<ProcessId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Process not found."))
}

/// Parses a script UID path segment. Malformed UIDs name no resource.
pub(crate) fn script_id(raw: &str) -> Result<ScriptId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound("Script not found."))
}
