//! In-memory adapters for the canceled-request list.

mod repository;

pub use repository::InMemoryCanceledRequestRepository;
