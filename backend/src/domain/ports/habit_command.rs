//! Driving port for habit mutations.
//!
//! Every request carries the resolved caller identity, or `None` when the
//! session holds no user. Implementations reject anonymous callers with
//! [`crate::domain::ErrorCode::Unauthorized`].

use async_trait::async_trait;

use crate::domain::{Error, HabitDetails, HabitId, UserId};

/// Request to create a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateHabitRequest {
    pub caller: Option<UserId>,
    pub details: HabitDetails,
}

/// Request to replace a habit's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateHabitRequest {
    pub caller: Option<UserId>,
    pub habit_id: HabitId,
    pub details: HabitDetails,
}

/// Request addressing one habit without further payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitRequest {
    pub caller: Option<UserId>,
    pub habit_id: HabitId,
}

/// Habit mutation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitCommand: Send + Sync {
    /// Create a habit owned by the caller with edit mode off.
    async fn create(&self, request: CreateHabitRequest) -> Result<HabitId, Error>;

    /// Replace name, description, weekly target, and colour.
    ///
    /// # Errors
    ///
    /// `NotFound` when the habit is absent or owned by someone else.
    async fn update(&self, request: UpdateHabitRequest) -> Result<(), Error>;

    /// Flip edit mode and return the new value.
    async fn toggle_edit_mode(&self, request: HabitRequest) -> Result<bool, Error>;

    /// Delete a habit and every completion recorded against it.
    async fn delete(&self, request: HabitRequest) -> Result<(), Error>;
}

/// Command double that accepts every request from an authenticated caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitCommand;

fn require_caller(caller: Option<UserId>) -> Result<UserId, Error> {
    caller.ok_or_else(|| Error::unauthorized("login required"))
}

#[async_trait]
impl HabitCommand for FixtureHabitCommand {
    async fn create(&self, request: CreateHabitRequest) -> Result<HabitId, Error> {
        require_caller(request.caller)?;
        Ok(HabitId::random())
    }

    async fn update(&self, request: UpdateHabitRequest) -> Result<(), Error> {
        require_caller(request.caller).map(drop)
    }

    async fn toggle_edit_mode(&self, request: HabitRequest) -> Result<bool, Error> {
        require_caller(request.caller)?;
        Ok(true)
    }

    async fn delete(&self, request: HabitRequest) -> Result<(), Error> {
        require_caller(request.caller).map(drop)
    }
}
