//! Domain model for canceled-request records.

mod canceled_request;
mod error;
mod priority;
mod uid;

pub use canceled_request::{
    ApplicationRef, CanceledRequest, CurrentDelegate, Delegation, MAX_NAME_LENGTH,
    MAX_TITLE_LENGTH, MAX_USERNAME_LENGTH, UserRef, WorkflowRef,
};
pub use error::CancellationDomainError;
pub use priority::DelegationPriority;
pub use uid::Uid;
