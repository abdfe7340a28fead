//! Driven port for completion persistence.

use async_trait::async_trait;

use crate::domain::{Completion, CompletionDate, DateRange, HabitId, ToggleOutcome, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by completion repository adapters.
    pub enum CompletionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "completion repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "completion repository query failed: {message}",
        /// A concurrent toggle inserted the same `(habit, date)` pair first.
        Duplicate { message: String } => "completion already recorded: {message}",
    }
}

/// Storage for completion records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Delete the completion for `(habit_id, date)` if one exists, otherwise
    /// insert one owned by `owner`.
    ///
    /// The habit is re-checked in the same atomic step as the write: `None`
    /// means it no longer exists or is not owned by `owner`, and nothing was
    /// written.
    async fn toggle(
        &self,
        habit_id: &HabitId,
        owner: &UserId,
        date: CompletionDate,
    ) -> Result<Option<ToggleOutcome>, CompletionRepositoryError>;

    /// Completions owned by `owner` whose date lies within `range`, ordered
    /// by date then habit.
    async fn list_for_owner_in_range(
        &self,
        owner: &UserId,
        range: &DateRange,
    ) -> Result<Vec<Completion>, CompletionRepositoryError>;
}

/// Repository that reports every toggle as a fresh mark and stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCompletionRepository;

#[async_trait]
impl CompletionRepository for FixtureCompletionRepository {
    async fn toggle(
        &self,
        _habit_id: &HabitId,
        _owner: &UserId,
        _date: CompletionDate,
    ) -> Result<Option<ToggleOutcome>, CompletionRepositoryError> {
        Ok(Some(ToggleOutcome::Marked))
    }

    async fn list_for_owner_in_range(
        &self,
        _owner: &UserId,
        _range: &DateRange,
    ) -> Result<Vec<Completion>, CompletionRepositoryError> {
        Ok(Vec::new())
    }
}
