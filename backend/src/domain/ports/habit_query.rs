//! Driving port for habit reads.

use async_trait::async_trait;

use crate::domain::{Error, Habit, UserId};

/// Habit read use-cases.
///
/// Reads never fail for lack of identity: an anonymous caller sees an empty
/// list.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HabitQuery: Send + Sync {
    /// Habits owned by `caller`, oldest first.
    async fn list(&self, caller: Option<UserId>) -> Result<Vec<Habit>, Error>;
}

/// Query double that always returns an empty list.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureHabitQuery;

#[async_trait]
impl HabitQuery for FixtureHabitQuery {
    async fn list(&self, _caller: Option<UserId>) -> Result<Vec<Habit>, Error> {
        Ok(Vec::new())
    }
}
