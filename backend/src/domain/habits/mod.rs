//! Habit aggregate and its validated field types.
//!
//! A habit belongs to exactly one owner and carries a weekly target, a display
//! colour, and an edit-mode flag that unlocks completion toggles for dates
//! other than today.

mod fields;
mod habit;

pub use fields::{
    DEFAULT_HABIT_COLOR, HABIT_COLOR_PALETTE, HABIT_DESCRIPTION_MAX, HABIT_NAME_MAX, HabitColor,
    HabitDescription, HabitId, HabitName, TARGET_DAYS_MAX, TARGET_DAYS_MIN, TargetDaysPerWeek,
};
pub use habit::{Habit, HabitDetails, HabitDraft};

/// Validation errors raised by habit field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HabitValidationError {
    /// Name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeded the character limit.
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    /// Description exceeded the character limit.
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    /// Weekly target fell outside the allowed range.
    #[error("targetDaysPerWeek must be between {min} and {max}, got {value}")]
    TargetDaysOutOfRange { value: i64, min: u8, max: u8 },
    /// Colour was neither a hex colour nor a swatch token.
    #[error("color must be a #RGB or #RRGGBB hex value or a lowercase swatch token")]
    InvalidColor,
}

impl HabitValidationError {
    /// Request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::DescriptionTooLong { .. } => "description",
            Self::TargetDaysOutOfRange { .. } => "targetDaysPerWeek",
            Self::InvalidColor => "color",
        }
    }

    /// Machine-readable detail code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::DescriptionTooLong { .. } => "description_too_long",
            Self::TargetDaysOutOfRange { .. } => "target_days_out_of_range",
            Self::InvalidColor => "invalid_color",
        }
    }
}
