//! Item sort policies.
//!
//! # Responsibility
//! - Name the orderings a caller can request for item lists.
//! - Order item snapshots under a strict total order.
//!
//! # Invariants
//! - Every policy breaks remaining ties by `uuid`, so repeated calls on
//!   identical input yield identical output.
//! - Sorting never mutates its input; callers get a new vector.

use crate::model::item::Item;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Error for sort policy names that match no known policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSortPolicy(pub String);

impl Display for InvalidSortPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort policy `{}`; expected optimized|creation_date|title",
            self.0
        )
    }
}

impl Error for InvalidSortPolicy {}

/// Named orderings for item lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Ascending by title, case-sensitive codepoint order.
    Title,
    /// Ascending by creation timestamp, oldest first.
    CreationDate,
    /// Incomplete before completed, then priority descending, then oldest
    /// first. Surfaces actionable urgent work while completed items sink to
    /// the bottom without being hidden.
    #[default]
    Optimized,
}

impl SortPolicy {
    /// Stable wire name of this policy.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CreationDate => "creation_date",
            Self::Optimized => "optimized",
        }
    }
}

impl FromStr for SortPolicy {
    type Err = InvalidSortPolicy;

    /// Resolves a policy by wire name.
    ///
    /// Unknown names are an error; nothing silently falls back to the
    /// default policy.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "title" => Ok(Self::Title),
            "creation_date" => Ok(Self::CreationDate),
            "optimized" => Ok(Self::Optimized),
            other => Err(InvalidSortPolicy(other.to_string())),
        }
    }
}

/// Returns a new vector holding `items` ordered under `policy`.
pub fn sorted_items(items: &[Item], policy: SortPolicy) -> Vec<Item> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| compare_items(a, b, policy));
    ordered
}

/// Comparator behind [`sorted_items`].
///
/// The policy keys are applied first; `uuid` settles whatever they leave
/// equal, making the order total.
pub fn compare_items(a: &Item, b: &Item, policy: SortPolicy) -> Ordering {
    let by_policy = match policy {
        SortPolicy::Title => a.title.cmp(&b.title),
        SortPolicy::CreationDate => a.created_at.cmp(&b.created_at),
        SortPolicy::Optimized => a
            .completed
            .cmp(&b.completed)
            .then_with(|| b.priority.cmp(&a.priority))
            .then_with(|| a.created_at.cmp(&b.created_at)),
    };
    by_policy.then_with(|| a.uuid.cmp(&b.uuid))
}
