//! Diesel schema for user persistence.

diesel::table! {
    /// Registered users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Normalized, lower-cased email address.
        #[max_length = 255]
        email -> Varchar,
        /// Optional display name.
        #[max_length = 255]
        full_name -> Nullable<Varchar>,
        /// PHC-encoded password hash.
        hashed_password -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
