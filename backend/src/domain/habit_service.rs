//! Habit domain service.
//!
//! Implements the habit driving ports over a [`HabitRepository`]. Ownership
//! checks live here: a habit owned by someone else is reported exactly like
//! a missing one.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateHabitRequest, HabitCommand, HabitQuery, HabitRepository, HabitRepositoryError,
    HabitRequest, UpdateHabitRequest,
};
use crate::domain::{Error, HABIT_NOT_FOUND_MESSAGE, Habit, HabitId, UserId};

/// Habit service implementing [`HabitCommand`] and [`HabitQuery`].
#[derive(Clone)]
pub struct HabitService<R> {
    habits: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> HabitService<R> {
    /// Create a service over `habits`, stamping creation times from `clock`.
    pub fn new(habits: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { habits, clock }
    }
}

pub(crate) fn map_habit_repository_error(error: HabitRepositoryError) -> Error {
    match error {
        HabitRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("habit repository unavailable: {message}"))
        }
        HabitRepositoryError::Query { message } => {
            Error::internal(format!("habit repository error: {message}"))
        }
    }
}

pub(crate) fn require_caller(caller: Option<UserId>) -> Result<UserId, Error> {
    caller.ok_or_else(|| Error::unauthorized("login required"))
}

pub(crate) fn habit_not_found() -> Error {
    Error::not_found(HABIT_NOT_FOUND_MESSAGE)
}

/// Load `habit_id` and confirm `caller` owns it.
pub(crate) async fn load_owned_habit<R>(
    habits: &R,
    caller: &UserId,
    habit_id: &HabitId,
) -> Result<Habit, Error>
where
    R: HabitRepository + ?Sized,
{
    let habit = habits
        .find_by_id(habit_id)
        .await
        .map_err(map_habit_repository_error)?
        .ok_or_else(habit_not_found)?;
    if !habit.is_owned_by(caller) {
        debug!(habit_id = %habit_id, caller = %caller, "habit owned by another user");
        return Err(habit_not_found());
    }
    Ok(habit)
}

impl<R> HabitService<R>
where
    R: HabitRepository,
{
    async fn owned(&self, request: HabitRequest) -> Result<(UserId, Habit), Error> {
        let caller = require_caller(request.caller)?;
        let habit = load_owned_habit(self.habits.as_ref(), &caller, &request.habit_id).await?;
        Ok((caller, habit))
    }
}

#[async_trait]
impl<R> HabitCommand for HabitService<R>
where
    R: HabitRepository,
{
    async fn create(&self, request: CreateHabitRequest) -> Result<HabitId, Error> {
        let owner = require_caller(request.caller)?;
        let habit = Habit::create(owner, request.details, self.clock.utc());
        self.habits
            .insert(&habit)
            .await
            .map_err(map_habit_repository_error)?;
        info!(habit_id = %habit.id(), owner = %owner, "habit created");
        Ok(habit.id())
    }

    async fn update(&self, request: UpdateHabitRequest) -> Result<(), Error> {
        let UpdateHabitRequest {
            caller,
            habit_id,
            details,
        } = request;
        self.owned(HabitRequest { caller, habit_id }).await?;
        let updated = self
            .habits
            .update_details(&habit_id, &details)
            .await
            .map_err(map_habit_repository_error)?;
        if !updated {
            return Err(habit_not_found());
        }
        debug!(habit_id = %habit_id, "habit details replaced");
        Ok(())
    }

    async fn toggle_edit_mode(&self, request: HabitRequest) -> Result<bool, Error> {
        self.owned(request).await?;
        let edit_mode = self
            .habits
            .toggle_edit_mode(&request.habit_id)
            .await
            .map_err(map_habit_repository_error)?
            .ok_or_else(habit_not_found)?;
        debug!(habit_id = %request.habit_id, edit_mode, "habit edit mode toggled");
        Ok(edit_mode)
    }

    async fn delete(&self, request: HabitRequest) -> Result<(), Error> {
        let (caller, _) = self.owned(request).await?;
        let deleted = self
            .habits
            .delete_with_completions(&request.habit_id)
            .await
            .map_err(map_habit_repository_error)?;
        if !deleted {
            return Err(habit_not_found());
        }
        info!(habit_id = %request.habit_id, owner = %caller, "habit deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> HabitQuery for HabitService<R>
where
    R: HabitRepository,
{
    async fn list(&self, caller: Option<UserId>) -> Result<Vec<Habit>, Error> {
        let Some(owner) = caller else {
            return Ok(Vec::new());
        };
        self.habits
            .list_for_owner(&owner)
            .await
            .map_err(map_habit_repository_error)
    }
}

#[cfg(test)]
#[path = "habit_service_tests.rs"]
mod tests;
