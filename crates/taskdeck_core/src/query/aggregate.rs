//! Project aggregation and progress math.
//!
//! # Responsibility
//! - Select and order the open/closed project views.
//! - Derive item counts and completion ratios from live item snapshots.
//!
//! # Invariants
//! - Aggregates are recomputed from the item collection on every read, never
//!   cached on the entity.
//! - An empty project reports a completion ratio of 0.0.

use crate::model::item::Item;
use crate::model::project::Project;

/// Progress snapshot for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    pub project: Project,
    /// Total items owned, independent of completion state.
    pub item_count: usize,
    /// Completed share in `[0.0, 1.0]`.
    pub completion_ratio: f64,
}

/// Open projects are browsed alphabetically: title ascending, ties by id.
pub fn open_projects_view(projects: &[Project]) -> Vec<Project> {
    let mut open: Vec<Project> = projects
        .iter()
        .filter(|project| !project.closed)
        .cloned()
        .collect();
    open.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.uuid.cmp(&b.uuid)));
    open
}

/// Closed projects are reviewed most-recent-first: creation descending, ties
/// by id.
pub fn closed_projects_view(projects: &[Project]) -> Vec<Project> {
    let mut closed: Vec<Project> = projects
        .iter()
        .filter(|project| project.closed)
        .cloned()
        .collect();
    closed.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.uuid.cmp(&b.uuid))
    });
    closed
}

/// Completed share of `items`, `0.0` when the collection is empty.
pub fn completion_ratio(items: &[Item]) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let completed = items.iter().filter(|item| item.completed).count();
    completed as f64 / items.len() as f64
}

/// Builds the progress snapshot for `project` over its current items.
pub fn summarize_project(project: &Project, items: &[Item]) -> ProjectSummary {
    ProjectSummary {
        project: project.clone(),
        item_count: items.len(),
        completion_ratio: completion_ratio(items),
    }
}
