//! `PostgreSQL` adapters for process catalogue persistence.

mod models;
mod repository;
pub(crate) mod schema;

pub use repository::PostgresProcessRepository;
