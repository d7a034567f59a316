//! Diesel schema for list and task persistence.

diesel::table! {
    /// Personal and family lists; exactly one of the owner columns is set.
    lists (id) {
        /// List identifier.
        id -> Uuid,
        /// List name.
        #[max_length = 255]
        name -> Varchar,
        /// Colour as `#RRGGBB`.
        #[max_length = 7]
        color -> Varchar,
        /// Owning user for personal lists.
        owner_id -> Nullable<Uuid>,
        /// Owning family for family lists.
        family_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks; rows cascade with their list.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning list.
        list_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional notes.
        notes -> Nullable<Text>,
        /// Completion flag.
        completed -> Bool,
        /// Assigned user.
        assignee_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> lists (list_id));
diesel::allow_tables_to_appear_in_same_query!(lists, tasks);
