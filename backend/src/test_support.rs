//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and when the `test-support` feature is enabled.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::LoginService;
use crate::domain::{CompletionService, Error, HabitService, LoginCredentials, UserId};
use crate::inbound::http::state::HttpStatePorts;
use crate::outbound::memory::InMemoryHabitStore;

/// Clock whose current instant tests can set and advance.
///
/// # Examples
///
/// ```rust
/// use habit_backend::test_support::MutableClock;
/// use mockable::Clock;
///
/// let clock = MutableClock::at_noon(2024, 3, 5);
/// clock.advance_days(1);
/// assert_eq!(clock.utc().date_naive().to_string(), "2024-03-06");
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// A clock fixed at 12:00 UTC on the given date.
    pub fn at_noon(year: i32, month: u32, day: u32) -> Self {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"));
        Self::new(now)
    }

    /// Move the clock to an exact instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance_days(&self, days: i64) {
        *self.lock_clock() += TimeDelta::days(days);
    }

    /// The UTC calendar date the clock currently reports.
    pub fn today(&self) -> NaiveDate {
        self.utc().date_naive()
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Login double that accepts any password for a known username.
///
/// Lets tests log in as several distinct owners.
#[derive(Debug, Default, Clone)]
pub struct StubLoginService {
    users: HashMap<String, UserId>,
}

impl StubLoginService {
    #[must_use]
    pub fn with_user(mut self, username: &str, user_id: UserId) -> Self {
        self.users.insert(username.to_owned(), user_id);
        self
    }
}

#[async_trait]
impl LoginService for StubLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        self.users
            .get(credentials.username())
            .copied()
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

/// Domain services wired to one shared [`InMemoryHabitStore`].
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use habit_backend::test_support::{InMemoryHarness, MutableClock, StubLoginService};
///
/// let harness = InMemoryHarness::new(MutableClock::at_noon(2024, 3, 5));
/// let _ports = harness.ports(Arc::new(StubLoginService::default()));
/// assert_eq!(harness.store.habit_count(), 0);
/// ```
pub struct InMemoryHarness {
    pub store: Arc<InMemoryHabitStore>,
    pub clock: Arc<MutableClock>,
}

impl InMemoryHarness {
    pub fn new(clock: MutableClock) -> Self {
        Self {
            store: Arc::new(InMemoryHabitStore::new()),
            clock: Arc::new(clock),
        }
    }

    pub fn habit_service(&self) -> HabitService<InMemoryHabitStore> {
        HabitService::new(self.store.clone(), self.clock.clone())
    }

    pub fn completion_service(&self) -> CompletionService<InMemoryHabitStore, InMemoryHabitStore> {
        CompletionService::new(self.store.clone(), self.store.clone(), self.clock.clone())
    }

    /// HTTP ports backed by the harness services.
    pub fn ports(&self, login: Arc<dyn LoginService>) -> HttpStatePorts {
        let habits = Arc::new(self.habit_service());
        let completions = Arc::new(self.completion_service());
        HttpStatePorts {
            login,
            habits: habits.clone(),
            habits_query: habits,
            completions: completions.clone(),
            completions_query: completions,
        }
    }
}
