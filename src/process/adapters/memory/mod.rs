//! In-memory adapters for the process catalogue.

mod repository;

pub use repository::InMemoryProcessRepository;
