//! Driven port for habit persistence.

use async_trait::async_trait;

use crate::domain::{Habit, HabitDetails, HabitId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by habit repository adapters.
    pub enum HabitRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "habit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "habit repository query failed: {message}",
    }
}

/// Storage for habits.
///
/// Adapters never filter by owner on single-habit lookups; ownership is
/// decided by the domain service so that "missing" and "not yours" stay
/// indistinguishable to callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitRepository: Send + Sync {
    /// Persist a newly created habit.
    async fn insert(&self, habit: &Habit) -> Result<(), HabitRepositoryError>;

    /// Fetch a habit by identifier regardless of owner.
    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, HabitRepositoryError>;

    /// All habits owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError>;

    /// Replace the editable fields of a habit.
    ///
    /// Returns `false` when no habit with `id` exists.
    async fn update_details(
        &self,
        id: &HabitId,
        details: &HabitDetails,
    ) -> Result<bool, HabitRepositoryError>;

    /// Flip the edit-mode flag and return its new value, or `None` when the
    /// habit does not exist.
    async fn toggle_edit_mode(&self, id: &HabitId) -> Result<Option<bool>, HabitRepositoryError>;

    /// Remove a habit together with all of its completions as one unit.
    ///
    /// Returns `false` when no habit with `id` exists.
    async fn delete_with_completions(&self, id: &HabitId) -> Result<bool, HabitRepositoryError>;
}

/// Repository that stores nothing and finds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitRepository;

#[async_trait]
impl HabitRepository for FixtureHabitRepository {
    async fn insert(&self, _habit: &Habit) -> Result<(), HabitRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &HabitId) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(None)
    }

    async fn list_for_owner(&self, _owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_details(
        &self,
        _id: &HabitId,
        _details: &HabitDetails,
    ) -> Result<bool, HabitRepositoryError> {
        Ok(false)
    }

    async fn toggle_edit_mode(&self, _id: &HabitId) -> Result<Option<bool>, HabitRepositoryError> {
        Ok(None)
    }

    async fn delete_with_completions(&self, _id: &HabitId) -> Result<bool, HabitRepositoryError> {
        Ok(false)
    }
}
