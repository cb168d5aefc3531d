//! Item persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and filtered listing over the `items` table.
//! - Provide transactional multi-row deletion for position-based removal.
//!
//! # Invariants
//! - List results use a deterministic base order (`uuid ASC`); display
//!   ordering is the query layer's job.
//! - `delete_items` removes every requested id or none.

use crate::model::item::{Item, ItemId};
use crate::model::project::ProjectId;
use crate::repo::{bool_to_int, parse_bool, parse_uuid, RepoError, RepoResult, SqliteStore};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row, TransactionBehavior};

const ITEM_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    detail,
    completed,
    priority,
    created_at,
    project_uuid
FROM items";

/// Project membership filter for item queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProjectScope {
    /// Items of every project, unassigned included.
    #[default]
    Any,
    /// Items owned by one project.
    Project(ProjectId),
    /// Items with no owning project.
    Unassigned,
}

/// Filter options for listing items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemListQuery {
    pub scope: ProjectScope,
    /// Keep only items with this completion state when set.
    pub completed: Option<bool>,
}

/// Persistence contract for items.
pub trait ItemRepository {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId>;
    fn update_item(&self, item: &Item) -> RepoResult<()>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    fn list_items(&self, query: &ItemListQuery) -> RepoResult<Vec<Item>>;
    fn delete_item(&self, id: ItemId) -> RepoResult<()>;
    /// Deletes every id in one transaction. A missing id rolls the whole
    /// batch back and reports `ItemNotFound`.
    fn delete_items(&mut self, ids: &[ItemId]) -> RepoResult<()>;
}

impl ItemRepository for SqliteStore<'_> {
    fn create_item(&self, item: &Item) -> RepoResult<ItemId> {
        self.conn().execute(
            "INSERT INTO items (
                uuid,
                title,
                detail,
                completed,
                priority,
                created_at,
                project_uuid
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                item.uuid.to_string(),
                item.title.as_str(),
                item.detail.as_str(),
                bool_to_int(item.completed),
                item.priority,
                item.created_at,
                item.project_uuid.map(|id| id.to_string()),
            ],
        )?;

        Ok(item.uuid)
    }

    fn update_item(&self, item: &Item) -> RepoResult<()> {
        let changed = self.conn().execute(
            "UPDATE items
             SET
                title = ?1,
                detail = ?2,
                completed = ?3,
                priority = ?4,
                created_at = ?5,
                project_uuid = ?6
             WHERE uuid = ?7;",
            params![
                item.title.as_str(),
                item.detail.as_str(),
                bool_to_int(item.completed),
                item.priority,
                item.created_at,
                item.project_uuid.map(|id| id.to_string()),
                item.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::ItemNotFound(item.uuid));
        }

        Ok(())
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{ITEM_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_item_row(row)?));
        }

        Ok(None)
    }

    fn list_items(&self, query: &ItemListQuery) -> RepoResult<Vec<Item>> {
        let mut sql = format!("{ITEM_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        match query.scope {
            ProjectScope::Any => {}
            ProjectScope::Project(id) => {
                sql.push_str(" AND project_uuid = ?");
                bind_values.push(Value::Text(id.to_string()));
            }
            ProjectScope::Unassigned => sql.push_str(" AND project_uuid IS NULL"),
        }

        if let Some(completed) = query.completed {
            sql.push_str(" AND completed = ?");
            bind_values.push(Value::Integer(bool_to_int(completed)));
        }

        sql.push_str(" ORDER BY uuid ASC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::ItemNotFound(id));
        }

        Ok(())
    }

    fn delete_items(&mut self, ids: &[ItemId]) -> RepoResult<()> {
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        for id in ids {
            let changed = tx.execute("DELETE FROM items WHERE uuid = ?1;", [id.to_string()])?;
            if changed == 0 {
                // Dropping the transaction rolls back the deletions so far.
                return Err(RepoError::ItemNotFound(*id));
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let uuid_text: String = row.get("uuid")?;
    let project_uuid = match row.get::<_, Option<String>>("project_uuid")? {
        Some(value) => Some(parse_uuid(&value, "items.project_uuid")?),
        None => None,
    };

    Ok(Item {
        uuid: parse_uuid(&uuid_text, "items.uuid")?,
        title: row.get("title")?,
        detail: row.get("detail")?,
        completed: parse_bool(row.get::<_, i64>("completed")?, "items.completed")?,
        priority: row.get("priority")?,
        created_at: row.get("created_at")?,
        project_uuid,
    })
}
