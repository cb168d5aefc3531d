//! Core domain logic for TaskDeck, a personal task/project tracker.
//! This crate is the single source of truth for ordering, aggregation and
//! mutation invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::item::{Item, ItemId, DEFAULT_ITEM_TITLE};
pub use model::project::{
    Project, ProjectId, DEFAULT_PROJECT_COLOR, DEFAULT_PROJECT_TITLE, PROJECT_COLORS,
};
pub use query::aggregate::{
    closed_projects_view, completion_ratio, open_projects_view, summarize_project, ProjectSummary,
};
pub use query::feed::{build_home_feed, HomeFeed, DEFAULT_FEED_LIMIT, UP_NEXT_LEN};
pub use query::sort::{sorted_items, InvalidSortPolicy, SortPolicy};
pub use repo::{
    EntityStore, ItemListQuery, ItemRepository, ProjectListQuery, ProjectRepository, ProjectScope,
    RepoError, RepoResult, SqliteStore,
};
pub use service::tracker_service::{TrackerError, TrackerResult, TrackerService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
