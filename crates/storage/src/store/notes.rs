#![forbid(unsafe_code)]

use super::*;
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    pub fn note_add(&mut self, request: NoteAddRequest) -> Result<NoteRow, StoreError> {
        if request.body.trim().is_empty() {
            return Err(StoreError::InvalidInput("note body must not be empty"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let lesson_exists = tx
            .query_row(
                "SELECT 1 FROM lessons WHERE id=?1",
                params![request.lesson_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !lesson_exists {
            return Err(StoreError::UnknownId);
        }

        tx.execute(
            r#"
            INSERT INTO lesson_notes(user_id, lesson_id, body, created_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![request.user_id, request.lesson_id, request.body, now_ms],
        )?;
        let seq = tx.last_insert_rowid();

        tx.commit()?;
        Ok(NoteRow {
            seq,
            lesson_id: request.lesson_id,
            body: request.body,
            created_at_ms: now_ms,
        })
    }

    pub fn notes_list(&self, user_id: &str, lesson_id: &str) -> Result<Vec<NoteRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT seq, lesson_id, body, created_at_ms
            FROM lesson_notes
            WHERE user_id = ?1 AND lesson_id = ?2
            ORDER BY seq ASC
            "#,
        )?;
        let rows = stmt.query_map(params![user_id, lesson_id], |row| {
            Ok(NoteRow {
                seq: row.get(0)?,
                lesson_id: row.get(1)?,
                body: row.get(2)?,
                created_at_ms: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Deletes a note; only the owning user's notes are reachable.
    pub fn note_delete(&mut self, user_id: &str, seq: i64) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM lesson_notes WHERE seq=?1 AND user_id=?2",
            params![seq, user_id],
        )?;
        if deleted == 0 {
            return Err(StoreError::UnknownId);
        }
        tx.commit()?;
        Ok(())
    }
}
