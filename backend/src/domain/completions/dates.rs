//! Calendar dates and inclusive date ranges.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::CompletionValidationError;

/// Wire format for completion dates.
pub const COMPLETION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the default history window, today included.
pub const HISTORY_WINDOW_DAYS: u64 = 90;

/// A calendar date with no time-of-day or zone component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompletionDate(NaiveDate);

impl CompletionDate {
    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// Shortened forms such as `2024-3-5` and impossible dates such as
    /// `2024-02-30` are rejected.
    ///
    /// # Examples
    /// ```
    /// use habit_backend::domain::CompletionDate;
    ///
    /// let date = CompletionDate::parse("2024-03-05").expect("valid date");
    /// assert_eq!(date.to_string(), "2024-03-05");
    /// assert!(CompletionDate::parse("2024-3-5").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CompletionValidationError> {
        let invalid = || CompletionValidationError::InvalidDate {
            value: raw.to_owned(),
        };
        let date = NaiveDate::parse_from_str(raw, COMPLETION_DATE_FORMAT).map_err(|_| invalid())?;
        // chrono accepts unpadded fields; only the canonical rendering is valid.
        if date.format(COMPLETION_DATE_FORMAT).to_string() != raw {
            return Err(invalid());
        }
        Ok(Self(date))
    }

    /// Wrap an existing calendar date.
    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The UTC calendar date of `instant`.
    #[must_use]
    pub fn utc_date_of(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for CompletionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(COMPLETION_DATE_FORMAT))
    }
}

impl FromStr for CompletionDate {
    type Err = CompletionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<CompletionDate> for NaiveDate {
    fn from(value: CompletionDate) -> Self {
        value.0
    }
}

/// Inclusive range of calendar dates.
///
/// A range whose start falls after its end is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: CompletionDate,
    end: CompletionDate,
}

impl DateRange {
    /// Range from `start` to `end`, both included.
    #[must_use]
    pub const fn new(start: CompletionDate, end: CompletionDate) -> Self {
        Self { start, end }
    }

    /// The `days` dates ending on `today`, inclusive.
    ///
    /// # Examples
    /// ```
    /// use habit_backend::domain::{CompletionDate, DateRange};
    ///
    /// let today = CompletionDate::parse("2024-03-31").expect("valid date");
    /// let range = DateRange::trailing(today, 7);
    /// assert_eq!(range.start().to_string(), "2024-03-25");
    /// assert_eq!(range.end(), today);
    /// ```
    #[must_use]
    pub fn trailing(today: CompletionDate, days: u64) -> Self {
        let span = days.saturating_sub(1);
        let start = today
            .0
            .checked_sub_days(Days::new(span))
            .unwrap_or(NaiveDate::MIN);
        Self {
            start: CompletionDate(start),
            end: today,
        }
    }

    /// First date, inclusive.
    #[must_use]
    pub const fn start(&self) -> CompletionDate {
        self.start
    }

    /// Last date, inclusive.
    #[must_use]
    pub const fn end(&self) -> CompletionDate {
        self.end
    }

    /// Whether the range contains no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Whether `date` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, date: CompletionDate) -> bool {
        self.start <= date && date <= self.end
    }
}
