#![forbid(unsafe_code)]

mod audit;
mod courses;
mod enrollments;
mod error;
mod lessons;
mod notes;
mod notifications;
mod progress;
mod requests;
mod schema;
mod sessions;
mod uploads;
mod users;

pub use error::StoreError;
pub use requests::*;

use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DB_FILE: &str = "courselab.db";
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = storage_dir.join(DB_FILE);
        let conn = Connection::open(db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        schema::install_schema(&conn)?;

        Ok(Self { conn, storage_dir })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Best-effort audit append for a committed structural mutation. An
    /// audit failure must never surface to the caller or undo the primary
    /// write, so it is logged and swallowed here.
    fn record_audit(
        &mut self,
        actor_user_id: Option<&str>,
        action: &str,
        entity: &str,
        summary: String,
        payload: serde_json::Value,
    ) {
        if let Err(err) = self.audit_append(actor_user_id, action, entity, &summary, &payload) {
            eprintln!("courselab: audit append failed ({action} {entity}): {err}");
        }
    }
}

pub(crate) fn now_ms() -> i64 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.as_millis() as i64
}

/// Mints the next value of a named monotonic counter inside the caller's
/// transaction, so ids are gapless per committed row.
pub(crate) fn next_counter_tx(tx: &Transaction<'_>, name: &str) -> Result<i64, StoreError> {
    let current: i64 = tx
        .query_row(
            "SELECT value FROM counters WHERE name=?1",
            params![name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);
    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO counters(name, value) VALUES (?1, ?2)
        ON CONFLICT(name) DO UPDATE SET value=excluded.value
        "#,
        params![name, next],
    )?;
    Ok(next)
}

pub(crate) fn course_exists_tx(tx: &Transaction<'_>, course_id: &str) -> Result<bool, StoreError> {
    Ok(tx
        .query_row(
            "SELECT 1 FROM courses WHERE id=?1",
            params![course_id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}
