//! In-process habit store.
//!
//! Backs both repository ports with one mutex-guarded state so that deleting
//! a habit and its completions is a single critical section. Used when no
//! database is configured and by the integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CompletionRepository, CompletionRepositoryError, HabitRepository, HabitRepositoryError,
};
use crate::domain::{
    Completion, CompletionDate, DateRange, Habit, HabitDetails, HabitId, ToggleOutcome, UserId,
};

#[derive(Debug, Default)]
struct StoreState {
    habits: HashMap<HabitId, Habit>,
    /// Insertion order of habit ids.
    order: Vec<HabitId>,
    completions: BTreeMap<(HabitId, CompletionDate), Completion>,
}

/// Volatile store implementing [`HabitRepository`] and
/// [`CompletionRepository`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use habit_backend::outbound::memory::InMemoryHabitStore;
///
/// let store = Arc::new(InMemoryHabitStore::default());
/// assert_eq!(store.habit_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryHabitStore {
    state: Mutex<StoreState>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryHabitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored habits.
    pub fn habit_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.habits.len())
    }

    /// Number of stored completions across all habits.
    pub fn completion_count(&self) -> usize {
        self.state.lock().map_or(0, |state| state.completions.len())
    }

    fn habits(&self) -> Result<MutexGuard<'_, StoreState>, HabitRepositoryError> {
        self.state
            .lock()
            .map_err(|_| HabitRepositoryError::query(POISONED))
    }

    fn completions(&self) -> Result<MutexGuard<'_, StoreState>, CompletionRepositoryError> {
        self.state
            .lock()
            .map_err(|_| CompletionRepositoryError::query(POISONED))
    }
}

#[async_trait]
impl HabitRepository for InMemoryHabitStore {
    async fn insert(&self, habit: &Habit) -> Result<(), HabitRepositoryError> {
        let mut state = self.habits()?;
        if state.habits.insert(habit.id(), habit.clone()).is_none() {
            state.order.push(habit.id());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &HabitId) -> Result<Option<Habit>, HabitRepositoryError> {
        Ok(self.habits()?.habits.get(id).cloned())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Habit>, HabitRepositoryError> {
        let state = self.habits()?;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.habits.get(id))
            .filter(|habit| habit.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn update_details(
        &self,
        id: &HabitId,
        details: &HabitDetails,
    ) -> Result<bool, HabitRepositoryError> {
        let mut state = self.habits()?;
        let Some(habit) = state.habits.remove(id) else {
            return Ok(false);
        };
        state.habits.insert(*id, habit.with_details(details.clone()));
        Ok(true)
    }

    async fn toggle_edit_mode(&self, id: &HabitId) -> Result<Option<bool>, HabitRepositoryError> {
        let mut state = self.habits()?;
        let Some(habit) = state.habits.remove(id) else {
            return Ok(None);
        };
        let toggled = habit.with_edit_mode_toggled();
        let edit_mode = toggled.edit_mode();
        state.habits.insert(*id, toggled);
        Ok(Some(edit_mode))
    }

    async fn delete_with_completions(&self, id: &HabitId) -> Result<bool, HabitRepositoryError> {
        let mut state = self.habits()?;
        if state.habits.remove(id).is_none() {
            return Ok(false);
        }
        state.order.retain(|kept| kept != id);
        state.completions.retain(|(habit_id, _), _| habit_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CompletionRepository for InMemoryHabitStore {
    async fn toggle(
        &self,
        habit_id: &HabitId,
        owner: &UserId,
        date: CompletionDate,
    ) -> Result<Option<ToggleOutcome>, CompletionRepositoryError> {
        let mut state = self.completions()?;
        let owned = state
            .habits
            .get(habit_id)
            .is_some_and(|habit| habit.is_owned_by(owner));
        if !owned {
            return Ok(None);
        }
        let key = (*habit_id, date);
        if state.completions.remove(&key).is_some() {
            return Ok(Some(ToggleOutcome::Unmarked));
        }
        state
            .completions
            .insert(key, Completion::record(*habit_id, *owner, date));
        Ok(Some(ToggleOutcome::Marked))
    }

    async fn list_for_owner_in_range(
        &self,
        owner: &UserId,
        range: &DateRange,
    ) -> Result<Vec<Completion>, CompletionRepositoryError> {
        let state = self.completions()?;
        let mut found: Vec<Completion> = state
            .completions
            .values()
            .filter(|completion| completion.owner_id() == *owner)
            .filter(|completion| range.contains(completion.date()))
            .cloned()
            .collect();
        found.sort_by_key(|completion| (completion.date(), completion.habit_id()));
        Ok(found)
    }
}
