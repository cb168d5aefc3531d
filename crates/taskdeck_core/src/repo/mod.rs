//! Entity store contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define persistence contracts for projects and items.
//! - Validate that a connection is migrated before accepting work.
//! - Carry the save contract mutations must honor.
//!
//! # Invariants
//! - Repositories return semantic errors (`ProjectNotFound`, `ItemNotFound`)
//!   in addition to transport errors.
//! - Multi-row mutations are transactional: every row or none.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod item_repo;
pub mod project_repo;

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::item::ItemId;
use crate::model::project::ProjectId;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub use item_repo::{ItemListQuery, ItemRepository, ProjectScope};
pub use project_repo::{ProjectListQuery, ProjectRepository};

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error taxonomy: transport failures plus semantic lookup misses.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Target item does not exist.
    ItemNotFound(ItemId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from the expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted into a valid read model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Unified store handle consumed by the mutation coordinator.
///
/// `save` commits pending state to durable storage. Every repository
/// mutation commits its own transaction, so a save with nothing pending is
/// an idempotent no-op.
pub trait EntityStore: ProjectRepository + ItemRepository {
    fn save(&mut self) -> RepoResult<()>;
}

/// SQLite-backed entity store over the `projects` and `items` tables.
pub struct SqliteStore<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Constructs a store over a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not run.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema does
    ///   not match what this binary expects.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        self.conn
    }
}

impl EntityStore for SqliteStore<'_> {
    fn save(&mut self) -> RepoResult<()> {
        // A stray open transaction means some write path skipped its commit;
        // flush it rather than leaving durability in doubt.
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT;")?;
        }
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version =
        conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in ["projects", "items"] {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    for column in ["uuid", "title", "color", "closed", "created_at"] {
        if !table_has_column(conn, "projects", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "projects",
                column,
            });
        }
    }

    for column in [
        "uuid",
        "title",
        "detail",
        "completed",
        "priority",
        "created_at",
        "project_uuid",
    ] {
        if !table_has_column(conn, "items", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "items",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}

pub(crate) fn parse_uuid(value: &str, context: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {context}")))
}

pub(crate) fn parse_bool(value: i64, context: &'static str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {context}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
