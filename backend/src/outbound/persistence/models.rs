//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{completions, habits};

/// Row read from the `habits` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = habits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HabitRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub target_days_per_week: i16,
    pub color: String,
    pub edit_mode: bool,
    pub created_at: DateTime<Utc>,
}

/// Insertable habit record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = habits)]
pub(crate) struct NewHabitRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub target_days_per_week: i16,
    pub color: &'a str,
    pub edit_mode: bool,
    pub created_at: DateTime<Utc>,
}

/// Changeset replacing the editable habit fields.
///
/// `treat_none_as_null` lets an update clear the description.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = habits)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct HabitDetailsUpdate<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub target_days_per_week: i16,
    pub color: &'a str,
}

/// Row read from the `completions` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = completions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompletionRow {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
}

/// Insertable completion record.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = completions)]
pub(crate) struct NewCompletionRow {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
}
