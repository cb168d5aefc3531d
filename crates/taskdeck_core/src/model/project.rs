//! Project domain model.
//!
//! # Responsibility
//! - Define the record that groups work items and tracks archive state.
//! - Resolve display defaults (title, palette color) at the read boundary.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another project.
//! - `closed` is the source of truth for archive state.
//! - An unrecognized stored color is kept as-is; only its display resolution
//!   falls back.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Title shown for projects whose stored title is empty.
pub const DEFAULT_PROJECT_TITLE: &str = "New Project";

/// Color used when a project has no color or an unrecognized one.
pub const DEFAULT_PROJECT_COLOR: &str = "Light Blue";

/// Named palette a project color may reference.
pub const PROJECT_COLORS: &[&str] = &[
    "Pink",
    "Purple",
    "Red",
    "Orange",
    "Gold",
    "Green",
    "Teal",
    "Light Blue",
    "Dark Blue",
    "Midnight",
    "Dark Gray",
    "Gray",
];

/// A group of work items with a shared color and archive state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable global ID used for item ownership and ordering tie-breaks.
    pub uuid: ProjectId,
    /// User-facing title. May be empty; see [`Project::display_title`].
    pub title: String,
    /// Palette color identifier. Validated at display time only.
    pub color: Option<String>,
    /// True once the project is archived.
    pub closed: bool,
    /// Creation timestamp in Unix epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Creates an open project with empty title, no color and
    /// `created_at = now`.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a project with a caller-provided stable ID.
    pub fn with_id(uuid: ProjectId) -> Self {
        Self {
            uuid,
            title: String::new(),
            color: None,
            closed: false,
            created_at: super::now_epoch_ms(),
        }
    }

    /// Returns the stored title, or the placeholder when it is empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_PROJECT_TITLE
        } else {
            &self.title
        }
    }

    /// Returns the stored color when it names a palette entry, otherwise
    /// [`DEFAULT_PROJECT_COLOR`].
    pub fn display_color(&self) -> &str {
        match self.color.as_deref() {
            Some(color) if PROJECT_COLORS.contains(&color) => color,
            _ => DEFAULT_PROJECT_COLOR,
        }
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
