//! Project lifecycle status
//!
//! Three stages in fixed order: `draft` (0), `in_progress` (1), `completed` (2).
//! The index is the only ranking used, both for advancing a project and for
//! the progress bar percentage.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Lifecycle stage of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
}

/// Direction of a status change requested from the project list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

impl ProjectStatus {
    /// All stages, in lifecycle order
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Draft,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    pub fn index(self) -> usize {
        match self {
            ProjectStatus::Draft => 0,
            ProjectStatus::InProgress => 1,
            ProjectStatus::Completed => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Storage string (`draft`, `in_progress`, `completed`)
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }

    /// Human-readable label used on slides and in the project list
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Draft => "Draft",
            ProjectStatus::InProgress => "In Progress",
            ProjectStatus::Completed => "Completed",
        }
    }

    /// Parse a value read from storage.
    ///
    /// Anything outside the three known values (including an empty string)
    /// loads as `Draft`.
    pub fn from_stored(value: &str) -> Self {
        match value.trim() {
            "in_progress" => ProjectStatus::InProgress,
            "completed" => ProjectStatus::Completed,
            _ => ProjectStatus::Draft,
        }
    }

    /// Neighbouring stage in `direction`, or `None` when already at a boundary
    pub fn step(self, direction: Direction) -> Option<Self> {
        let current = self.index();
        let last = Self::ALL.len() - 1;
        let next = match direction {
            Direction::Next => (current + 1).min(last),
            Direction::Prev => current.saturating_sub(1),
        };

        if next == current {
            None
        } else {
            Self::from_index(next)
        }
    }

    /// Progress bar percentage: `(index + 1) / 3 * 100`
    pub fn progress(self) -> f64 {
        (self.index() as f64 + 1.0) / Self::ALL.len() as f64 * 100.0
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Lenient on the way in: rows written by older clients may carry junk.
impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::from_stored).unwrap_or_default())
    }
}
