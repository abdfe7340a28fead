//! Domain primitives, aggregates, and services.
//!
//! Purpose: define strongly typed habit-tracking entities and the use-cases
//! that operate on them. Inbound adapters reach this layer through the driving
//! ports in [`ports`]; persistence plugs in behind the driven repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - UserId: authenticated caller identity.
//! - Habit and its validated field types.
//! - Completion, CompletionDate, DateRange: completion records and calendar
//!   addressing.
//! - HabitService / CompletionService: driving-port implementations.

pub mod auth;
pub mod completion_service;
pub mod completions;
pub mod error;
pub mod habit_service;
pub mod habits;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::completion_service::CompletionService;
pub use self::completions::{
    COMPLETION_DATE_FORMAT, Completion, CompletionDate, CompletionId, CompletionValidationError,
    DateRange, HISTORY_WINDOW_DAYS, ToggleOutcome,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::habit_service::HabitService;
pub use self::habits::{
    DEFAULT_HABIT_COLOR, HABIT_COLOR_PALETTE, HABIT_DESCRIPTION_MAX, HABIT_NAME_MAX, Habit,
    HabitColor, HabitDescription, HabitDetails, HabitDraft, HabitId, HabitName,
    HabitValidationError, TARGET_DAYS_MAX, TARGET_DAYS_MIN, TargetDaysPerWeek,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

/// Message shared by "missing" and "owned by someone else" lookups so callers
/// cannot probe for other users' habits.
pub const HABIT_NOT_FOUND_MESSAGE: &str = "habit not found";
