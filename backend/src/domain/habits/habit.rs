//! Habit aggregate.

use chrono::{DateTime, Utc};

use super::{HabitColor, HabitDescription, HabitId, HabitName, TargetDaysPerWeek};
use crate::domain::UserId;

/// The owner-editable part of a habit.
///
/// Create and Update both supply a full set of details; Update replaces all
/// four fields at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDetails {
    pub name: HabitName,
    pub description: Option<HabitDescription>,
    pub target_days_per_week: TargetDaysPerWeek,
    pub color: HabitColor,
}

/// Input for [`Habit::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitDraft {
    pub id: HabitId,
    pub owner_id: UserId,
    pub details: HabitDetails,
    pub edit_mode: bool,
    pub created_at: DateTime<Utc>,
}

/// A recurring activity tracked by one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    id: HabitId,
    owner_id: UserId,
    details: HabitDetails,
    edit_mode: bool,
    created_at: DateTime<Utc>,
}

impl Habit {
    /// Assemble a habit from already-validated parts.
    #[must_use]
    pub fn new(draft: HabitDraft) -> Self {
        let HabitDraft {
            id,
            owner_id,
            details,
            edit_mode,
            created_at,
        } = draft;
        Self {
            id,
            owner_id,
            details,
            edit_mode,
            created_at,
        }
    }

    /// Start a brand new habit with edit mode off.
    #[must_use]
    pub fn create(owner_id: UserId, details: HabitDetails, created_at: DateTime<Utc>) -> Self {
        Self::new(HabitDraft {
            id: HabitId::random(),
            owner_id,
            details,
            edit_mode: false,
            created_at,
        })
    }

    /// Stable habit identifier.
    pub fn id(&self) -> HabitId {
        self.id
    }

    /// User who created the habit.
    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    /// Whether `user` owns this habit.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner_id == *user
    }

    /// All editable fields.
    pub fn details(&self) -> &HabitDetails {
        &self.details
    }

    /// Trimmed display name.
    pub fn name(&self) -> &HabitName {
        &self.details.name
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&HabitDescription> {
        self.details.description.as_ref()
    }

    /// Weekly goal, between one and seven days.
    pub fn target_days_per_week(&self) -> TargetDaysPerWeek {
        self.details.target_days_per_week
    }

    /// Hex colour or swatch token.
    pub fn color(&self) -> &HabitColor {
        &self.details.color
    }

    /// Whether completions may be toggled for dates other than today.
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Creation time, used for list ordering.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the editable fields, leaving identity and edit mode intact.
    #[must_use]
    pub fn with_details(self, details: HabitDetails) -> Self {
        Self { details, ..self }
    }

    /// Flip the edit-mode flag.
    #[must_use]
    pub fn with_edit_mode_toggled(self) -> Self {
        Self {
            edit_mode: !self.edit_mode,
            ..self
        }
    }
}
