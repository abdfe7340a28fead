//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Habits, one row per tracked activity.
    habits (id) {
        id -> Uuid,
        /// Owning user; never changes after insert.
        owner_id -> Uuid,
        name -> Varchar,
        description -> Nullable<Text>,
        /// Constrained to 1..=7 by a CHECK.
        target_days_per_week -> Int2,
        color -> Varchar,
        edit_mode -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Completion marks, unique per `(habit_id, date)`.
    completions (id) {
        id -> Uuid,
        /// References `habits.id` with `ON DELETE CASCADE`.
        habit_id -> Uuid,
        /// Copy of the habit owner for range queries.
        owner_id -> Uuid,
        date -> Date,
    }
}

diesel::joinable!(completions -> habits (habit_id));
diesel::allow_tables_to_appear_in_same_query!(completions, habits);
