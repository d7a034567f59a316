//! Diesel schema for family persistence.

diesel::table! {
    /// Families and their permanent invite codes.
    families (id) {
        /// Family identifier.
        id -> Uuid,
        /// Family display name.
        #[max_length = 255]
        name -> Varchar,
        /// Founding admin.
        admin_id -> Uuid,
        /// Unique invite code.
        #[max_length = 32]
        invite_code -> Varchar,
        /// Founding timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per member; the primary key enforces a single family per user.
    family_members (user_id) {
        /// Member identifier.
        user_id -> Uuid,
        /// Family the member belongs to.
        family_id -> Uuid,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(family_members -> families (family_id));
diesel::allow_tables_to_appear_in_same_query!(families, family_members);
