//! Tracker read facade and mutation coordinator.
//!
//! # Responsibility
//! - Expose the display-facing read operations over the pure query layer.
//! - Translate position-based deletion requests into entity deletions.
//! - Persist every mutation before returning.
//!
//! # Invariants
//! - Deletion offsets are resolved against one ordered snapshot taken at
//!   call time; the order is never recomputed mid-operation.
//! - Reads return owned snapshots, never live store references.
//! - Mutations take `&mut self`, so one completes before the next begins.

use crate::model::item::{Item, ItemId};
use crate::model::project::{Project, ProjectId};
use crate::query::aggregate::{
    closed_projects_view, open_projects_view, summarize_project, ProjectSummary,
};
use crate::query::feed::{build_home_feed, HomeFeed, DEFAULT_FEED_LIMIT};
use crate::query::sort::{sorted_items, SortPolicy};
use crate::repo::{EntityStore, ItemListQuery, ProjectListQuery, ProjectScope, RepoError};
use log::info;
use std::collections::{BTreeSet, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors from tracker service operations.
#[derive(Debug)]
pub enum TrackerError {
    /// A deletion offset lies outside the ordered view it was resolved
    /// against.
    PositionOutOfRange { position: usize, len: usize },
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Store-level failure, propagated unchanged.
    Store(RepoError),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PositionOutOfRange { position, len } => write!(
                f,
                "position {position} is out of range for a view of {len} item(s)"
            ),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ProjectNotFound(id) => Self::ProjectNotFound(id),
            other => Self::Store(other),
        }
    }
}

/// Facade over the entity store for presentation callers.
pub struct TrackerService<S: EntityStore> {
    store: S,
}

impl<S: EntityStore> TrackerService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Builds the home feed with the default limit of
    /// [`DEFAULT_FEED_LIMIT`] items.
    pub fn home_feed(&self) -> TrackerResult<HomeFeed> {
        self.home_feed_with_limit(DEFAULT_FEED_LIMIT)
    }

    /// Builds the home feed capped at `limit` items.
    ///
    /// # Contract
    /// - Selects incomplete items across every open project; unassigned
    ///   items are included, items of closed projects never qualify.
    /// - Never pads and never errors on an empty result.
    pub fn home_feed_with_limit(&self, limit: usize) -> TrackerResult<HomeFeed> {
        let open: HashSet<ProjectId> = self
            .store
            .list_projects(&ProjectListQuery {
                closed: Some(false),
            })?
            .into_iter()
            .map(|project| project.uuid)
            .collect();

        let items: Vec<Item> = self
            .store
            .list_items(&ItemListQuery {
                completed: Some(false),
                ..ItemListQuery::default()
            })?
            .into_iter()
            .filter(|item| {
                item.project_uuid
                    .map_or(true, |project| open.contains(&project))
            })
            .collect();

        Ok(build_home_feed(&items, limit))
    }

    /// Lists the items of `project` ordered under `policy`.
    ///
    /// This is the authoritative ordering for position-based deletion.
    pub fn project_items(
        &self,
        project: ProjectId,
        policy: SortPolicy,
    ) -> TrackerResult<Vec<Item>> {
        self.require_project(project)?;
        let items = self.store.list_items(&ItemListQuery {
            scope: ProjectScope::Project(project),
            ..ItemListQuery::default()
        })?;
        Ok(sorted_items(&items, policy))
    }

    /// Lists items with no owning project, ordered under `policy`.
    pub fn unassigned_items(&self, policy: SortPolicy) -> TrackerResult<Vec<Item>> {
        let items = self.store.list_items(&ItemListQuery {
            scope: ProjectScope::Unassigned,
            ..ItemListQuery::default()
        })?;
        Ok(sorted_items(&items, policy))
    }

    /// Open projects, title ascending.
    pub fn open_projects(&self) -> TrackerResult<Vec<Project>> {
        let projects = self.store.list_projects(&ProjectListQuery {
            closed: Some(false),
        })?;
        Ok(open_projects_view(&projects))
    }

    /// Closed projects, most recently created first.
    pub fn closed_projects(&self) -> TrackerResult<Vec<Project>> {
        let projects = self.store.list_projects(&ProjectListQuery { closed: Some(true) })?;
        Ok(closed_projects_view(&projects))
    }

    /// Progress snapshot for one project, recomputed from its current items.
    pub fn project_summary(&self, project: ProjectId) -> TrackerResult<ProjectSummary> {
        let record = self
            .store
            .get_project(project)?
            .ok_or(TrackerError::ProjectNotFound(project))?;
        let items = self.store.list_items(&ItemListQuery {
            scope: ProjectScope::Project(project),
            ..ItemListQuery::default()
        })?;
        Ok(summarize_project(&record, &items))
    }

    /// Progress snapshots for every open project, title ascending.
    pub fn open_project_summaries(&self) -> TrackerResult<Vec<ProjectSummary>> {
        let projects = self.open_projects()?;
        let mut summaries = Vec::with_capacity(projects.len());
        for project in projects {
            let items = self.store.list_items(&ItemListQuery {
                scope: ProjectScope::Project(project.uuid),
                ..ItemListQuery::default()
            })?;
            summaries.push(summarize_project(&project, &items));
        }
        Ok(summaries)
    }

    /// Creates an open project with default fields and persists it.
    pub fn create_project(&mut self) -> TrackerResult<ProjectId> {
        let project = Project::new();
        let id = self.store.create_project(&project)?;
        self.store.save()?;
        info!("event=create_project module=service status=ok project={id}");
        Ok(id)
    }

    /// Creates an incomplete item and persists it.
    ///
    /// # Contract
    /// - `project = None` yields an unassigned item, not an error; it can be
    ///   assigned later through [`TrackerService::update_item`].
    /// - A dangling project id fails with `ProjectNotFound`.
    pub fn create_item(&mut self, project: Option<ProjectId>) -> TrackerResult<ItemId> {
        if let Some(project) = project {
            self.require_project(project)?;
        }

        let item = Item::new(project);
        let id = self.store.create_item(&item)?;
        self.store.save()?;
        info!(
            "event=create_item module=service status=ok item={id} assigned={}",
            project.is_some()
        );
        Ok(id)
    }

    /// Replaces an item's stored fields and persists the change.
    pub fn update_item(&mut self, item: &Item) -> TrackerResult<()> {
        if let Some(project) = item.project_uuid {
            self.require_project(project)?;
        }
        self.store.update_item(item)?;
        self.store.save()?;
        Ok(())
    }

    /// Replaces a project's stored fields and persists the change.
    ///
    /// Closing and reopening a project happens through this operation.
    pub fn update_project(&mut self, project: &Project) -> TrackerResult<()> {
        self.store.update_project(project)?;
        self.store.save()?;
        Ok(())
    }

    /// Deletes the items shown at `positions` in the ordered view
    /// [`TrackerService::project_items`] produces at call time.
    ///
    /// # Contract
    /// - The ordered view is materialized once; every offset resolves
    ///   against that single snapshot.
    /// - Any offset outside the view fails with `PositionOutOfRange` and
    ///   leaves the store unchanged.
    /// - Duplicate offsets collapse to one deletion.
    pub fn delete_items_at_positions(
        &mut self,
        project: ProjectId,
        policy: SortPolicy,
        positions: &[usize],
    ) -> TrackerResult<()> {
        let snapshot = self.project_items(project, policy)?;

        let mut resolved = BTreeSet::new();
        for &position in positions {
            if position >= snapshot.len() {
                return Err(TrackerError::PositionOutOfRange {
                    position,
                    len: snapshot.len(),
                });
            }
            resolved.insert(position);
        }

        let ids: Vec<ItemId> = resolved
            .iter()
            .map(|&position| snapshot[position].uuid)
            .collect();
        self.store.delete_items(&ids)?;
        self.store.save()?;
        info!(
            "event=delete_items module=service status=ok project={project} count={}",
            ids.len()
        );
        Ok(())
    }

    /// Deletes a project and, through the store cascade, every item it owns.
    pub fn delete_project(&mut self, project: ProjectId) -> TrackerResult<()> {
        self.store.delete_project(project)?;
        self.store.save()?;
        info!("event=delete_project module=service status=ok project={project}");
        Ok(())
    }

    /// Commits pending state; idempotent when nothing is pending.
    pub fn save(&mut self) -> TrackerResult<()> {
        self.store.save()?;
        Ok(())
    }

    /// Gets one item by stable id.
    pub fn item(&self, id: ItemId) -> TrackerResult<Option<Item>> {
        Ok(self.store.get_item(id)?)
    }

    /// Gets one project by stable id.
    pub fn project(&self, id: ProjectId) -> TrackerResult<Option<Project>> {
        Ok(self.store.get_project(id)?)
    }

    fn require_project(&self, project: ProjectId) -> TrackerResult<()> {
        match self.store.get_project(project)? {
            Some(_) => Ok(()),
            None => Err(TrackerError::ProjectNotFound(project)),
        }
    }
}
