//! Completion record.

use std::fmt;

use uuid::Uuid;

use super::CompletionDate;
use crate::domain::{HabitId, UserId};

/// Stable completion identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionId(Uuid);

impl CompletionId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CompletionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A habit marked as done on a calendar date.
///
/// At most one completion exists per `(habit_id, date)` pair. The owner is
/// denormalised from the habit so range queries need no join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    id: CompletionId,
    habit_id: HabitId,
    owner_id: UserId,
    date: CompletionDate,
}

impl Completion {
    /// Rebuild a completion from stored parts.
    #[must_use]
    pub const fn new(
        id: CompletionId,
        habit_id: HabitId,
        owner_id: UserId,
        date: CompletionDate,
    ) -> Self {
        Self {
            id,
            habit_id,
            owner_id,
            date,
        }
    }

    /// Record a fresh completion with a generated identifier.
    #[must_use]
    pub fn record(habit_id: HabitId, owner_id: UserId, date: CompletionDate) -> Self {
        Self::new(CompletionId::random(), habit_id, owner_id, date)
    }

    /// Stable identifier of this record.
    pub fn id(&self) -> CompletionId {
        self.id
    }

    /// Habit this completion belongs to.
    pub fn habit_id(&self) -> HabitId {
        self.habit_id
    }

    /// Owner copied from the habit.
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Calendar day the habit was done.
    pub fn date(&self) -> CompletionDate {
        self.date
    }
}

/// Result of flipping a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A completion now exists for the date.
    Marked,
    /// The existing completion was removed.
    Unmarked,
}

impl ToggleOutcome {
    /// Whether the date is marked complete after the toggle.
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Marked)
    }
}
