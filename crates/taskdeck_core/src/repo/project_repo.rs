//! Project persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered listing over the `projects` table.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - List results use a deterministic base order (`uuid ASC`); display
//!   ordering is the query layer's job.
//! - Deleting a project deletes its items through the schema cascade.

use crate::model::project::{Project, ProjectId};
use crate::repo::{bool_to_int, parse_bool, parse_uuid, RepoError, RepoResult, SqliteStore};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    color,
    closed,
    created_at
FROM projects";

/// Filter options for listing projects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectListQuery {
    /// Keep only projects with this archive state when set.
    pub closed: Option<bool>,
}

/// Persistence contract for projects.
pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    fn update_project(&self, project: &Project) -> RepoResult<()>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>>;
    /// Deletes the project and, through `ON DELETE CASCADE`, every item it
    /// owns.
    fn delete_project(&mut self, id: ProjectId) -> RepoResult<()>;
}

impl ProjectRepository for SqliteStore<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        self.conn().execute(
            "INSERT INTO projects (
                uuid,
                title,
                color,
                closed,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                project.uuid.to_string(),
                project.title.as_str(),
                project.color.as_deref(),
                bool_to_int(project.closed),
                project.created_at,
            ],
        )?;

        Ok(project.uuid)
    }

    fn update_project(&self, project: &Project) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE projects
             SET
                title = ?1,
                color = ?2,
                closed = ?3,
                created_at = ?4
             WHERE uuid = ?5;",
            params![
                project.title.as_str(),
                project.color.as_deref(),
                bool_to_int(project.closed),
                project.created_at,
                project.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ProjectNotFound(project.uuid));
        }

        Ok(())
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }

        Ok(None)
    }

    fn list_projects(&self, query: &ProjectListQuery) -> RepoResult<Vec<Project>> {
        let mut sql = format!("{PROJECT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(closed) = query.closed {
            sql.push_str(" AND closed = ?");
            bind_values.push(Value::Integer(bool_to_int(closed)));
        }

        sql.push_str(" ORDER BY uuid ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn delete_project(&mut self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM projects WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::ProjectNotFound(id));
        }

        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;

    Ok(Project {
        uuid: parse_uuid(&uuid_text, "projects.uuid")?,
        title: row.get("title")?,
        color: row.get("color")?,
        closed: parse_bool(row.get::<_, i64>("closed")?, "projects.closed")?,
        created_at: row.get("created_at")?,
    })
}
