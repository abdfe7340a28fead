//! Driving port for completion toggles.

use async_trait::async_trait;

use crate::domain::{CompletionDate, Error, HabitId, ToggleOutcome, UserId};

/// Request to flip the completion state of one habit on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleCompletionRequest {
    pub caller: Option<UserId>,
    pub habit_id: HabitId,
    pub date: CompletionDate,
}

/// Completion mutation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionCommand: Send + Sync {
    /// Mark the date if unmarked, otherwise unmark it.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` without a caller.
    /// - `NotFound` when the habit is absent or owned by someone else.
    /// - `EditModeRequired` when `date` is not today and the habit is not in
    ///   edit mode.
    async fn toggle(&self, request: ToggleCompletionRequest) -> Result<ToggleOutcome, Error>;
}

/// Command double that marks every date for authenticated callers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCompletionCommand;

#[async_trait]
impl CompletionCommand for FixtureCompletionCommand {
    async fn toggle(&self, request: ToggleCompletionRequest) -> Result<ToggleOutcome, Error> {
        match request.caller {
            Some(_) => Ok(ToggleOutcome::Marked),
            None => Err(Error::unauthorized("login required")),
        }
    }
}
