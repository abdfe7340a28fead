//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CompletionCommand, CompletionQuery, FixtureCompletionCommand, FixtureCompletionQuery,
    FixtureHabitCommand, FixtureHabitQuery, FixtureLoginService, HabitCommand, HabitQuery,
    LoginService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
    pub completions: Arc<dyn CompletionCommand>,
    pub completions_query: Arc<dyn CompletionQuery>,
}

impl HttpStatePorts {
    /// Ports backed entirely by fixture doubles.
    ///
    /// Tests override the fields they care about with struct update syntax.
    #[must_use]
    pub fn fixtures() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            habits: Arc::new(FixtureHabitCommand),
            habits_query: Arc::new(FixtureHabitQuery),
            completions: Arc::new(FixtureCompletionCommand),
            completions_query: Arc::new(FixtureCompletionQuery),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub habits: Arc<dyn HabitCommand>,
    pub habits_query: Arc<dyn HabitQuery>,
    pub completions: Arc<dyn CompletionCommand>,
    pub completions_query: Arc<dyn CompletionQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use habit_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let state = HttpState::new(HttpStatePorts::fixtures());
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            habits,
            habits_query,
            completions,
            completions_query,
        } = ports;
        Self {
            login,
            habits,
            habits_query,
            completions,
            completions_query,
        }
    }
}
