//! PostgreSQL-backed `HabitRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::warn;

use crate::domain::ports::{HabitRepository, HabitRepositoryError};
use crate::domain::{
    Habit, HabitColor, HabitDescription, HabitDetails, HabitDraft, HabitId, HabitName,
    TargetDaysPerWeek, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{HabitDetailsUpdate, HabitRow, NewHabitRow};
use super::pool::{DbPool, PoolError};
use super::schema::{completions, habits};

/// Diesel-backed implementation of the `HabitRepository` port.
#[derive(Clone)]
pub struct DieselHabitRepository {
    pool: DbPool,
}

impl DieselHabitRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> HabitRepositoryError {
    map_basic_pool_error(error, |message| HabitRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> HabitRepositoryError {
    map_basic_diesel_error(
        error,
        HabitRepositoryError::query,
        HabitRepositoryError::connection,
    )
}

/// Convert a stored row back into a domain habit.
///
/// Rows are written through validated types, so a failure here means the
/// table was edited out of band.
fn row_to_habit(row: HabitRow) -> Result<Habit, HabitRepositoryError> {
    let invalid = |err: crate::domain::HabitValidationError| {
        warn!(habit_id = %row.id, error = %err, "stored habit failed validation");
        HabitRepositoryError::query(format!("stored habit {} is invalid: {err}", row.id))
    };
    let details = HabitDetails {
        name: HabitName::new(&row.name).map_err(invalid)?,
        description: HabitDescription::from_optional(row.description.as_deref())
            .map_err(invalid)?,
        target_days_per_week: TargetDaysPerWeek::new(i64::from(row.target_days_per_week))
            .map_err(invalid)?,
        color: HabitColor::new(&row.color).map_err(invalid)?,
    };
    Ok(Habit::new(HabitDraft {
        id: HabitId::from_uuid(row.id),
        owner_id: UserId::from_uuid(row.owner_id),
        details,
        edit_mode: row.edit_mode,
        created_at: row.created_at,
    }))
}

fn details_update(details: &HabitDetails) -> HabitDetailsUpdate<'_> {
    HabitDetailsUpdate {
        name: details.name.as_ref(),
        description: details.description.as_ref().map(AsRef::as_ref),
        target_days_per_week: i16::from(details.target_days_per_week.get()),
        color: details.color.as_ref(),
    }
}

#[async_trait]
impl HabitRepository for DieselHabitRepository {
    async fn insert(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = details_update(habit.details());
        let row = NewHabitRow {
            id: *habit.id().as_uuid(),
            owner_id: *habit.owner_id().as_uuid(),
            name: details.name,
            description: details.description,
            target_days_per_week: details.target_days_per_week,
            color: details.color,
            edit_mode: habit.edit_mode(),
            created_at: habit.created_at(),
        };

        diesel::insert_into(habits::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<HabitRow> = habits::table
            .filter(habits::id.eq(id.as_uuid()))
            .select(HabitRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_habit).transpose()
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HabitRow> = habits::table
            .filter(habits::owner_id.eq(owner.as_uuid()))
            .order_by((habits::created_at.asc(), habits::id.asc()))
            .select(HabitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_habit).collect()
    }

    async fn update_details(
        &self,
        id: &HabitId,
        details: &HabitDetails,
    ) -> Result<bool, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(habits::table.filter(habits::id.eq(id.as_uuid())))
            .set(&details_update(details))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(updated > 0)
    }

    async fn toggle_edit_mode(&self, id: &HabitId) -> Result<Option<bool>, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(habits::table.filter(habits::id.eq(id.as_uuid())))
            .set(habits::edit_mode.eq(diesel::dsl::not(habits::edit_mode)))
            .returning(habits::edit_mode)
            .get_result::<bool>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)
    }

    async fn delete_with_completions(&self, id: &HabitId) -> Result<bool, HabitRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let habit_id = *id.as_uuid();

        let deleted = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(completions::table.filter(completions::habit_id.eq(habit_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(habits::table.filter(habits::id.eq(habit_id)))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
