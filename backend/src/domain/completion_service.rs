//! Completion domain service.
//!
//! Toggles are gated on the habit's edit mode: only today's date may be
//! toggled while edit mode is off. "Today" is the UTC calendar date read once
//! per call from the injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::habit_service::{habit_not_found, load_owned_habit, require_caller};
use crate::domain::ports::{
    CompletionCommand, CompletionHistoryRequest, CompletionQuery, CompletionRepository,
    CompletionRepositoryError, HabitRepository, ToggleCompletionRequest,
};
use crate::domain::{
    Completion, CompletionDate, DateRange, Error, HISTORY_WINDOW_DAYS, ToggleOutcome,
};

/// Completion service implementing [`CompletionCommand`] and
/// [`CompletionQuery`].
#[derive(Clone)]
pub struct CompletionService<H, C> {
    habits: Arc<H>,
    completions: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<H, C> CompletionService<H, C> {
    /// Build the service over both repositories and the clock that defines "today".
    pub fn new(habits: Arc<H>, completions: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            habits,
            completions,
            clock,
        }
    }

    fn today(&self) -> CompletionDate {
        CompletionDate::utc_date_of(self.clock.utc())
    }
}

fn map_completion_repository_error(error: CompletionRepositoryError) -> Error {
    match error {
        CompletionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("completion repository unavailable: {message}"))
        }
        CompletionRepositoryError::Query { message } => {
            Error::internal(format!("completion repository error: {message}"))
        }
        CompletionRepositoryError::Duplicate { message } => Error::conflict(format!(
            "completion changed concurrently, reload and retry: {message}"
        )),
    }
}

#[async_trait]
impl<H, C> CompletionCommand for CompletionService<H, C>
where
    H: HabitRepository,
    C: CompletionRepository,
{
    async fn toggle(&self, request: ToggleCompletionRequest) -> Result<ToggleOutcome, Error> {
        let ToggleCompletionRequest {
            caller,
            habit_id,
            date,
        } = request;
        let caller = require_caller(caller)?;
        let habit = load_owned_habit(self.habits.as_ref(), &caller, &habit_id).await?;

        let today = self.today();
        if date != today && !habit.edit_mode() {
            debug!(habit_id = %habit_id, %date, %today, "past toggle refused outside edit mode");
            return Err(Error::edit_mode_required(
                "turn on edit mode to change dates other than today",
            ));
        }

        let outcome = self
            .completions
            .toggle(&habit_id, &caller, date)
            .await
            .map_err(map_completion_repository_error)?
            .ok_or_else(|| {
                debug!(habit_id = %habit_id, "habit removed before the toggle was written");
                habit_not_found()
            })?;
        debug!(habit_id = %habit_id, %date, completed = outcome.is_completed(), "completion toggled");
        Ok(outcome)
    }
}

#[async_trait]
impl<H, C> CompletionQuery for CompletionService<H, C>
where
    H: HabitRepository,
    C: CompletionRepository,
{
    async fn history(&self, request: CompletionHistoryRequest) -> Result<Vec<Completion>, Error> {
        let Some(owner) = request.caller else {
            return Ok(Vec::new());
        };
        let end = match request.end {
            Some(end) => end,
            None => self.today(),
        };
        let start = request
            .start
            .unwrap_or_else(|| DateRange::trailing(end, HISTORY_WINDOW_DAYS).start());
        let range = DateRange::new(start, end);
        if range.is_empty() {
            return Ok(Vec::new());
        }

        self.completions
            .list_for_owner_in_range(&owner, &range)
            .await
            .map_err(map_completion_repository_error)
    }
}

#[cfg(test)]
#[path = "completion_service_tests.rs"]
mod tests;
