//! Canceled-request record.

use super::{DelegationPriority, Uid};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::num::NonZeroU32;

/// Maximum length of application, process and task titles.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Maximum length of the current delegate's username.
pub const MAX_USERNAME_LENGTH: usize = 100;

/// Maximum length of the current delegate's first and last names.
pub const MAX_NAME_LENGTH: usize = 50;

/// The canceled application (case).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRef {
    /// Application UID; one record exists per application.
    pub uid: Uid,
    /// Human-facing case number.
    pub number: NonZeroU32,
    /// Case title at cancellation time.
    pub title: String,
}

/// A process or task the canceled application was running in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRef {
    /// Engine UID.
    pub uid: Uid,
    /// Numeric engine identifier, `0` when unknown.
    pub id: u32,
    /// Title at cancellation time.
    pub title: String,
}

/// The user whose list the record appears in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    /// User UID.
    pub uid: Uid,
    /// Numeric user identifier, `0` when unknown.
    pub id: u32,
}

/// Display identity of the user holding the delegation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentDelegate {
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

/// The delegation that was active when the request was canceled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delegation {
    /// One-based position in the case's delegation history.
    pub index: NonZeroU32,
    /// User who held the previous delegation, if any.
    pub previous_user_uid: Option<Uid>,
    /// User holding this delegation.
    pub current_user: CurrentDelegate,
    /// When the delegation was assigned.
    pub delegated_at: DateTime<Utc>,
    /// When work on the delegation started.
    pub initiated_at: Option<DateTime<Utc>>,
    /// When the delegation was due.
    pub due_at: Option<DateTime<Utc>>,
    /// Delegation priority.
    pub priority: DelegationPriority,
}

/// One row of the canceled-request list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanceledRequest {
    /// Canceled application.
    pub application: ApplicationRef,
    /// Process the application belonged to.
    pub process: WorkflowRef,
    /// Task the application was in.
    pub task: WorkflowRef,
    /// User owning the list entry.
    pub user: UserRef,
    /// Active delegation at cancellation.
    pub delegation: Delegation,
    /// Cancellation time. Rows written before stamping was enforced may
    /// lack it.
    pub canceled_at: Option<DateTime<Utc>>,
}

impl CanceledRequest {
    /// Returns the application UID identifying this record.
    #[must_use]
    pub const fn app_uid(&self) -> &Uid {
        &self.application.uid
    }

    /// Returns whether the record belongs to the given process.
    #[must_use]
    pub fn belongs_to_process(&self, process_uid: &Uid) -> bool {
        &self.process.uid == process_uid
    }

    /// Returns whether the record is listed for the given user.
    #[must_use]
    pub fn listed_for(&self, user_uid: &Uid) -> bool {
        &self.user.uid == user_uid
    }

    /// Orders records newest cancellation first, then by application UID.
    ///
    /// Records without a cancellation time sort before all others, as
    /// `PostgreSQL` does for `NULL` in descending order.
    #[must_use]
    pub fn listing_order(&self, other: &Self) -> Ordering {
        let by_date = match (self.canceled_at, other.canceled_at) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(left), Some(right)) => right.cmp(&left),
        };
        by_date.then_with(|| self.app_uid().cmp(other.app_uid()))
    }
}
