//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories translate between Diesel rows and domain types and hold no
//! business logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a
//! `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use habit_backend::outbound::persistence::{DbPool, DieselHabitRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/habits")).await?;
//! let habits = DieselHabitRepository::new(pool);
//! # drop(habits);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_completion_repository;
mod diesel_habit_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_completion_repository::DieselCompletionRepository;
pub use diesel_habit_repository::DieselHabitRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
