//! In-memory adapters for script persistence.

mod repository;

pub use repository::InMemoryScriptRepository;
