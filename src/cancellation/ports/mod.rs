//! Port contracts for the canceled-request list.

pub mod repository;

pub use repository::{
    CanceledRequestRepository, CanceledRequestRepositoryError, CanceledRequestRepositoryResult,
    CancellationListQuery, PurgeScope,
};
