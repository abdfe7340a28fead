//! PostgreSQL-backed `CompletionRepository` implementation using Diesel ORM.
//!
//! Toggling runs the lookup and the delete-or-insert inside one transaction
//! that first locks the owning habit row with `SELECT ... FOR UPDATE`, so a
//! concurrent delete either completes first (the toggle then finds no habit)
//! or waits and cascades over the new mark. Two concurrent first toggles of the same `(habit, date)` race on the
//! unique constraint; the loser receives
//! [`CompletionRepositoryError::Duplicate`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{CompletionRepository, CompletionRepositoryError};
use crate::domain::{
    Completion, CompletionDate, CompletionId, DateRange, HabitId, ToggleOutcome, UserId,
};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CompletionRow, NewCompletionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{completions, habits};

/// Diesel-backed implementation of the `CompletionRepository` port.
#[derive(Clone)]
pub struct DieselCompletionRepository {
    pool: DbPool,
}

impl DieselCompletionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CompletionRepositoryError {
    map_basic_pool_error(error, |message| {
        CompletionRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CompletionRepositoryError {
    if is_unique_violation(&error) {
        return CompletionRepositoryError::duplicate("completion for this habit and date exists");
    }
    map_basic_diesel_error(
        error,
        CompletionRepositoryError::query,
        CompletionRepositoryError::connection,
    )
}

fn row_to_completion(row: CompletionRow) -> Completion {
    Completion::new(
        CompletionId::from_uuid(row.id),
        HabitId::from_uuid(row.habit_id),
        UserId::from_uuid(row.owner_id),
        CompletionDate::from_naive(row.date),
    )
}

#[async_trait]
impl CompletionRepository for DieselCompletionRepository {
    async fn toggle(
        &self,
        habit_id: &HabitId,
        owner: &UserId,
        date: CompletionDate,
    ) -> Result<Option<ToggleOutcome>, CompletionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCompletionRow {
            id: *CompletionId::random().as_uuid(),
            habit_id: *habit_id.as_uuid(),
            owner_id: *owner.as_uuid(),
            date: date.as_naive(),
        };

        conn.transaction(|conn| {
            async move {
                let owned: Option<Uuid> = habits::table
                    .filter(habits::id.eq(new_row.habit_id))
                    .filter(habits::owner_id.eq(new_row.owner_id))
                    .select(habits::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if owned.is_none() {
                    return Ok(None);
                }

                let existing: Option<Uuid> = completions::table
                    .filter(completions::habit_id.eq(new_row.habit_id))
                    .filter(completions::date.eq(new_row.date))
                    .select(completions::id)
                    .first(conn)
                    .await
                    .optional()?;

                match existing {
                    Some(id) => {
                        diesel::delete(completions::table.filter(completions::id.eq(id)))
                            .execute(conn)
                            .await?;
                        Ok(Some(ToggleOutcome::Unmarked))
                    }
                    None => {
                        diesel::insert_into(completions::table)
                            .values(&new_row)
                            .execute(conn)
                            .await?;
                        Ok(Some(ToggleOutcome::Marked))
                    }
                }
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list_for_owner_in_range(
        &self,
        owner: &UserId,
        range: &DateRange,
    ) -> Result<Vec<Completion>, CompletionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CompletionRow> = completions::table
            .filter(completions::owner_id.eq(owner.as_uuid()))
            .filter(completions::date.between(range.start().as_naive(), range.end().as_naive()))
            .order_by((completions::date.asc(), completions::habit_id.asc()))
            .select(CompletionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_completion).collect())
    }
}
