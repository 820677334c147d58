//! Diesel schema for the canceled-request list.

diesel::table! {
    /// Denormalised canceled-request reporting rows.
    list_canceled (app_uid) {
        /// Application UID.
        #[max_length = 32]
        app_uid -> Varchar,
        /// User owning the list entry.
        #[max_length = 32]
        usr_uid -> Varchar,
        /// Task UID.
        #[max_length = 32]
        tas_uid -> Varchar,
        /// Process UID.
        #[max_length = 32]
        pro_uid -> Varchar,
        /// Case number.
        app_number -> Int4,
        /// Case title.
        #[max_length = 255]
        app_title -> Varchar,
        /// Process title.
        #[max_length = 255]
        app_pro_title -> Varchar,
        /// Task title.
        #[max_length = 255]
        app_tas_title -> Varchar,
        /// Cancellation time.
        app_canceled_date -> Nullable<Timestamptz>,
        /// Delegation index.
        del_index -> Int4,
        /// Previous delegate UID, empty when none.
        #[max_length = 32]
        del_previous_usr_uid -> Varchar,
        /// Current delegate username.
        #[max_length = 100]
        del_current_usr_username -> Varchar,
        /// Current delegate first name.
        #[max_length = 50]
        del_current_usr_firstname -> Varchar,
        /// Current delegate last name.
        #[max_length = 50]
        del_current_usr_lastname -> Varchar,
        /// Delegation time.
        del_delegate_date -> Timestamptz,
        /// Delegation start time.
        del_init_date -> Nullable<Timestamptz>,
        /// Delegation due time.
        del_due_date -> Nullable<Timestamptz>,
        /// Priority digit.
        #[max_length = 32]
        del_priority -> Varchar,
        /// Numeric process identifier.
        pro_id -> Int4,
        /// Numeric user identifier.
        usr_id -> Int4,
        /// Numeric task identifier.
        tas_id -> Int4,
    }
}
