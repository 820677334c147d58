//! `PostgreSQL` adapters for the canceled-request list.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresCanceledRequestRepository;
