//! Completion records and the calendar types used to address them.
//!
//! A completion marks one habit as done on one calendar date. Dates carry no
//! time zone; "today" is derived from the injected clock in UTC.

mod completion;
mod dates;

pub use completion::{Completion, CompletionId, ToggleOutcome};
pub use dates::{COMPLETION_DATE_FORMAT, CompletionDate, DateRange, HISTORY_WINDOW_DAYS};

/// Validation errors raised when parsing completion inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompletionValidationError {
    /// Date was not a real calendar date in `YYYY-MM-DD` form.
    #[error("date must be a calendar date formatted as YYYY-MM-DD, got {value:?}")]
    InvalidDate { value: String },
}

impl CompletionValidationError {
    /// Machine-readable detail code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "invalid_date",
        }
    }
}
