//! Application services for the canceled-request list.

mod ledger;

pub use ledger::{
    CancellationLedgerService, CancellationListParams, CancellationServiceError,
    CancellationServiceResult, RecordCancellationRequest,
};
