//! Diesel schema for script persistence.

diesel::table! {
    /// Stored process scripts.
    scripts (id) {
        /// Script identifier.
        id -> Uuid,
        /// Owning process identifier.
        process_id -> Uuid,
        /// Unique script title.
        #[max_length = 255]
        title -> Varchar,
        /// Script description.
        description -> Text,
        /// Language tag.
        #[max_length = 32]
        language -> Varchar,
        /// Source code body.
        code -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
