//! Work item domain model.
//!
//! # Responsibility
//! - Define the record for a single unit of work tracked under a project.
//! - Provide constructors with tracker defaults and display fallbacks.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another item.
//! - An item references at most one owning project at a time.
//! - Display fallbacks never rewrite the stored value.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::project::ProjectId;

/// Stable identifier for a work item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Title shown for items whose stored title is empty.
pub const DEFAULT_ITEM_TITLE: &str = "New Item";

/// A single unit of work, owned by zero or one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Stable global ID used for ordering tie-breaks and deletion.
    pub uuid: ItemId,
    /// User-facing title. May be empty; see [`Item::display_title`].
    pub title: String,
    /// Free-form detail text. May be empty.
    pub detail: String,
    /// Completion state. Completed items sink in the optimized order and
    /// never enter the home feed.
    pub completed: bool,
    /// Urgency weight, higher is more urgent. No fixed bound.
    pub priority: i64,
    /// Creation timestamp in Unix epoch milliseconds.
    pub created_at: i64,
    /// Owning project. `None` means the item is unassigned.
    pub project_uuid: Option<ProjectId>,
}

impl Item {
    /// Creates an item with tracker defaults: empty title and detail,
    /// incomplete, priority 0, `created_at = now`.
    pub fn new(project_uuid: Option<ProjectId>) -> Self {
        Self::with_id(Uuid::new_v4(), project_uuid)
    }

    /// Creates an item with a caller-provided stable ID.
    ///
    /// Used by import/test paths where identity already exists externally.
    pub fn with_id(uuid: ItemId, project_uuid: Option<ProjectId>) -> Self {
        Self {
            uuid,
            title: String::new(),
            detail: String::new(),
            completed: false,
            priority: 0,
            created_at: super::now_epoch_ms(),
            project_uuid,
        }
    }

    /// Returns the stored title, or the placeholder when it is empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_ITEM_TITLE
        } else {
            &self.title
        }
    }
}
