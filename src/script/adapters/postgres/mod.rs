//! `PostgreSQL` adapters for script persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresScriptRepository;
