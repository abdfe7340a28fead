//! Validated habit field types.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::HabitValidationError;

/// Maximum habit name length in characters.
pub const HABIT_NAME_MAX: usize = 80;
/// Maximum habit description length in characters.
pub const HABIT_DESCRIPTION_MAX: usize = 500;
/// Lowest accepted weekly target.
pub const TARGET_DAYS_MIN: u8 = 1;
/// Highest accepted weekly target.
pub const TARGET_DAYS_MAX: u8 = 7;
/// Colour assigned when a client omits one.
pub const DEFAULT_HABIT_COLOR: &str = "#10B981";
/// Swatches offered by the client colour picker, default first.
pub const HABIT_COLOR_PALETTE: [&str; 8] = [
    DEFAULT_HABIT_COLOR,
    "#3B82F6",
    "#6366F1",
    "#8B5CF6",
    "#EC4899",
    "#EF4444",
    "#F59E0B",
    "#84CC16",
];

/// Stable habit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(Uuid);

impl HabitId {
    /// Generate a fresh identifier for a new habit.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Trimmed, non-empty habit name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitName(String);

impl HabitName {
    /// Validate and construct a habit name.
    ///
    /// # Examples
    /// ```
    /// use habit_backend::domain::HabitName;
    ///
    /// let name = HabitName::new("  Run  ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Run");
    /// assert!(HabitName::new("   ").is_err());
    /// ```
    pub fn new(name: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        if trimmed.chars().count() > HABIT_NAME_MAX {
            return Err(HabitValidationError::NameTooLong {
                max: HABIT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for HabitName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<HabitName> for String {
    fn from(value: HabitName) -> Self {
        value.0
    }
}

impl TryFrom<String> for HabitName {
    type Error = HabitValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Free-form habit description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDescription(String);

impl HabitDescription {
    /// Normalise an optional description: blank input becomes `None`.
    pub fn from_optional(
        description: Option<impl AsRef<str>>,
    ) -> Result<Option<Self>, HabitValidationError> {
        let Some(raw) = description else {
            return Ok(None);
        };
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > HABIT_DESCRIPTION_MAX {
            return Err(HabitValidationError::DescriptionTooLong {
                max: HABIT_DESCRIPTION_MAX,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }
}

impl AsRef<str> for HabitDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Weekly completion target between one and seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetDaysPerWeek(u8);

impl TargetDaysPerWeek {
    /// Validate a raw weekly target.
    ///
    /// # Examples
    /// ```
    /// use habit_backend::domain::TargetDaysPerWeek;
    ///
    /// assert_eq!(TargetDaysPerWeek::new(3).map(|t| t.get()), Ok(3));
    /// assert!(TargetDaysPerWeek::new(0).is_err());
    /// assert!(TargetDaysPerWeek::new(8).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, HabitValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|days| (TARGET_DAYS_MIN..=TARGET_DAYS_MAX).contains(days))
            .map(Self)
            .ok_or(HabitValidationError::TargetDaysOutOfRange {
                value,
                min: TARGET_DAYS_MIN,
                max: TARGET_DAYS_MAX,
            })
    }

    /// Numeric value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<TargetDaysPerWeek> for u8 {
    fn from(value: TargetDaysPerWeek) -> Self {
        value.0
    }
}

/// Display colour: a `#RGB`/`#RRGGBB` hex value or a named swatch token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitColor(String);

static HABIT_COLOR_RE: OnceLock<Regex> = OnceLock::new();

fn habit_color_regex() -> &'static Regex {
    HABIT_COLOR_RE.get_or_init(|| {
        let pattern = r"^(#[0-9A-Fa-f]{3}|#[0-9A-Fa-f]{6}|[a-z][a-z0-9-]{0,31})$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("habit color regex failed to compile: {error}"))
    })
}

impl HabitColor {
    /// Validate a colour token.
    pub fn new(color: impl AsRef<str>) -> Result<Self, HabitValidationError> {
        let trimmed = color.as_ref().trim();
        if !habit_color_regex().is_match(trimmed) {
            return Err(HabitValidationError::InvalidColor);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl Default for HabitColor {
    fn default() -> Self {
        Self(DEFAULT_HABIT_COLOR.to_owned())
    }
}

impl AsRef<str> for HabitColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<HabitColor> for String {
    fn from(value: HabitColor) -> Self {
        value.0
    }
}

impl TryFrom<String> for HabitColor {
    type Error = HabitValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
