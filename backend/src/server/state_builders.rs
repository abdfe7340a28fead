//! Builders wiring repositories and services into HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use habit_backend::domain::ports::{
    CompletionRepository, FixtureLoginService, HabitRepository, LoginService,
};
use habit_backend::domain::{CompletionService, HabitService};
use habit_backend::inbound::http::state::{HttpState, HttpStatePorts};
use habit_backend::outbound::memory::InMemoryHabitStore;
use habit_backend::outbound::persistence::{DieselCompletionRepository, DieselHabitRepository};

use super::ServerConfig;

/// Build the command and query ports for one pair of repositories.
///
/// The same service instance backs both the command and query side so the
/// HTTP layer can depend on the narrowest trait for each handler.
fn ports_for<H, C>(
    habits: Arc<H>,
    completions: Arc<C>,
    clock: Arc<dyn Clock>,
    login: Arc<dyn LoginService>,
) -> HttpStatePorts
where
    H: HabitRepository + 'static,
    C: CompletionRepository + 'static,
{
    let habit_service = Arc::new(HabitService::new(habits.clone(), clock.clone()));
    let completion_service = Arc::new(CompletionService::new(habits, completions, clock));
    HttpStatePorts {
        login,
        habits: habit_service.clone(),
        habits_query: habit_service,
        completions: completion_service.clone(),
        completions_query: completion_service,
    }
}

/// Build the shared HTTP state.
///
/// Uses Diesel repositories when a pool is configured and the in-memory
/// store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let login: Arc<dyn LoginService> = Arc::new(FixtureLoginService);

    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL habit storage");
            ports_for(
                Arc::new(DieselHabitRepository::new(pool.clone())),
                Arc::new(DieselCompletionRepository::new(pool.clone())),
                clock,
                login,
            )
        }
        None => {
            warn!("no database configured; habits are kept in memory");
            let store = Arc::new(InMemoryHabitStore::new());
            ports_for(store.clone(), store, clock, login)
        }
    };

    web::Data::new(HttpState::new(ports))
}
