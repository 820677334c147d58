//! Diesel schema for process persistence.

diesel::table! {
    /// Process catalogue records.
    processes (id) {
        /// Process identifier.
        id -> Uuid,
        /// Unique process name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
