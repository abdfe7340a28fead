//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are called by
//! inbound adapters. Driven ports (`*Repository`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod completion_command;
mod completion_query;
mod completion_repository;
mod habit_command;
mod habit_query;
mod habit_repository;
mod login_service;

pub use completion_command::{
    CompletionCommand, FixtureCompletionCommand, ToggleCompletionRequest,
};
#[cfg(test)]
pub use completion_command::MockCompletionCommand;
pub use completion_query::{CompletionHistoryRequest, CompletionQuery, FixtureCompletionQuery};
#[cfg(test)]
pub use completion_query::MockCompletionQuery;
pub use completion_repository::{
    CompletionRepository, CompletionRepositoryError, FixtureCompletionRepository,
};
#[cfg(test)]
pub use completion_repository::MockCompletionRepository;
pub use habit_command::{
    CreateHabitRequest, FixtureHabitCommand, HabitCommand, HabitRequest, UpdateHabitRequest,
};
#[cfg(test)]
pub use habit_command::MockHabitCommand;
pub use habit_query::{FixtureHabitQuery, HabitQuery};
#[cfg(test)]
pub use habit_query::MockHabitQuery;
pub use habit_repository::{FixtureHabitRepository, HabitRepository, HabitRepositoryError};
#[cfg(test)]
pub use habit_repository::MockHabitRepository;
pub use login_service::{FIXTURE_USER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use login_service::MockLoginService;
