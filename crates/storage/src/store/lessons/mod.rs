#![forbid(unsafe_code)]

mod create;
mod delete;
mod reorder;
mod update;

use super::*;
use rusqlite::{OptionalExtension, Row, Transaction, params};

pub(crate) fn lesson_from_row(row: &Row<'_>) -> rusqlite::Result<LessonRow> {
    Ok(LessonRow {
        id: row.get(0)?,
        course_id: row.get(1)?,
        position: row.get(2)?,
        title: row.get(3)?,
        media_upload_id: row.get(4)?,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
    })
}

pub(crate) const LESSON_COLUMNS: &str =
    "id, course_id, position, title, media_upload_id, created_at_ms, updated_at_ms";

pub(crate) fn lesson_count_tx(tx: &Transaction<'_>, course_id: &str) -> Result<i64, StoreError> {
    Ok(tx.query_row(
        "SELECT COUNT(*) FROM lessons WHERE course_id=?1",
        params![course_id],
        |row| row.get(0),
    )?)
}

pub(crate) fn lesson_locate_tx(
    tx: &Transaction<'_>,
    lesson_id: &str,
) -> Result<Option<(String, i64)>, StoreError> {
    Ok(tx
        .query_row(
            "SELECT course_id, position FROM lessons WHERE id=?1",
            params![lesson_id],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
        )
        .optional()?)
}

impl SqliteStore {
    pub fn lesson_get(&self, lesson_id: &str) -> Result<Option<LessonRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id=?1"),
                params![lesson_id],
                lesson_from_row,
            )
            .optional()?)
    }

    pub fn lessons_list(&self, course_id: &str) -> Result<Vec<LessonRow>, StoreError> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM courses WHERE id=?1",
                params![course_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !exists {
            return Err(StoreError::UnknownId);
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LESSON_COLUMNS} FROM lessons WHERE course_id=?1 ORDER BY position ASC"
        ))?;
        let rows = stmt.query_map(params![course_id], lesson_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
