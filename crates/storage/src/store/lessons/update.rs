#![forbid(unsafe_code)]

use super::*;
use crate::store::*;
use crate::store::uploads::attach_upload_tx;
use rusqlite::{TransactionBehavior, params};
use serde_json::json;

impl SqliteStore {
    /// Edits a lesson's payload fields and/or moves it within its course.
    ///
    /// The target position is clamped into [1, N]. A move shifts the
    /// displaced sibling range first and writes the moved row last, so the
    /// ordering is never observable with a gap or duplicate outside this
    /// transaction.
    pub fn lesson_update(&mut self, request: LessonUpdateRequest) -> Result<LessonRow, StoreError> {
        if request.title.is_none() && request.media_upload_id.is_none() && request.position.is_none()
        {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }
        if let Some(title) = request.title.as_deref()
            && title.trim().is_empty()
        {
            return Err(StoreError::InvalidInput("title must not be empty"));
        }
        if let Some(position) = request.position
            && position < 1
        {
            return Err(StoreError::InvalidInput("position must be >= 1"));
        }

        let now_ms = now_ms();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some((course_id, current)) = lesson_locate_tx(&tx, &request.lesson_id)? else {
            return Err(StoreError::UnknownId);
        };

        let mut moved_to: Option<i64> = None;
        if let Some(requested) = request.position {
            let count = lesson_count_tx(&tx, &course_id)?;
            let target = requested.min(count);
            if target < current {
                tx.execute(
                    r#"
                    UPDATE lessons SET position = position + 1
                    WHERE course_id = ?1 AND position >= ?2 AND position < ?3
                    "#,
                    params![course_id, target, current],
                )?;
            } else if target > current {
                tx.execute(
                    r#"
                    UPDATE lessons SET position = position - 1
                    WHERE course_id = ?1 AND position > ?2 AND position <= ?3
                    "#,
                    params![course_id, current, target],
                )?;
            }
            if target != current {
                // The moved row is placed last, after the bulk shift.
                tx.execute(
                    "UPDATE lessons SET position = ?2 WHERE id = ?1",
                    params![request.lesson_id, target],
                )?;
                moved_to = Some(target);
            }
        }

        if let Some(title) = request.title.as_deref() {
            tx.execute(
                "UPDATE lessons SET title = ?2 WHERE id = ?1",
                params![request.lesson_id, title],
            )?;
        }
        if let Some(media) = request.media_upload_id.as_ref() {
            if let Some(upload_id) = media.as_deref() {
                attach_upload_tx(&tx, upload_id)?;
            }
            tx.execute(
                "UPDATE lessons SET media_upload_id = ?2 WHERE id = ?1",
                params![request.lesson_id, media],
            )?;
        }
        tx.execute(
            "UPDATE lessons SET updated_at_ms = ?2 WHERE id = ?1",
            params![request.lesson_id, now_ms],
        )?;

        let row = tx.query_row(
            &format!("SELECT {LESSON_COLUMNS} FROM lessons WHERE id=?1"),
            params![request.lesson_id],
            lesson_from_row,
        )?;

        tx.commit()?;
        self.record_audit(
            request.actor_user_id.as_deref(),
            if moved_to.is_some() { "lesson_move" } else { "lesson_edit" },
            &request.lesson_id,
            match moved_to {
                Some(target) => format!("moved lesson from position {current} to {target}"),
                None => "edited lesson fields".to_string(),
            },
            json!({ "course_id": course_id, "from": current, "to": moved_to }),
        );

        Ok(row)
    }
}
