#![forbid(unsafe_code)]

use super::*;
use crate::store::*;
use crate::store::notifications::notify_enrolled_tx;
use crate::store::uploads::attach_upload_tx;
use rusqlite::{TransactionBehavior, params};
use serde_json::json;

impl SqliteStore {
    /// Creates a lesson in a course, appending when no position is given.
    ///
    /// With a requested position, every sibling at that position or later is
    /// shifted down by one and the new lesson takes the requested slot. The
    /// requested position is not clamped to the course length; callers that
    /// pass a position past the end get exactly that position.
    pub fn lesson_create(&mut self, request: LessonCreateRequest) -> Result<LessonRow, StoreError> {
        if request.title.trim().is_empty() {
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

        if !course_exists_tx(&tx, &request.course_id)? {
            return Err(StoreError::UnknownId);
        }

        let count = lesson_count_tx(&tx, &request.course_id)?;
        let position = match request.position {
            None => count + 1,
            Some(requested) => {
                // Make room: everything at or past the slot moves down one.
                // When requested > count this touches no rows.
                tx.execute(
                    "UPDATE lessons SET position = position + 1 WHERE course_id = ?1 AND position >= ?2",
                    params![request.course_id, requested],
                )?;
                requested
            }
        };

        if let Some(upload_id) = request.media_upload_id.as_deref() {
            attach_upload_tx(&tx, upload_id)?;
        }

        let seq = next_counter_tx(&tx, "lesson_seq")?;
        let id = format!("LSN-{seq:03}");

        tx.execute(
            r#"
            INSERT INTO lessons(id, course_id, position, title, media_upload_id, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
            params![
                id,
                request.course_id,
                position,
                request.title,
                request.media_upload_id,
                now_ms
            ],
        )?;

        notify_enrolled_tx(
            &tx,
            &request.course_id,
            "lesson_added",
            &format!("New lesson \"{}\" is available", request.title),
            now_ms,
        )?;

        tx.commit()?;
        self.record_audit(
            request.actor_user_id.as_deref(),
            "lesson_create",
            &id,
            format!("created lesson \"{}\" at position {position}", request.title),
            json!({ "course_id": request.course_id, "position": position }),
        );

        Ok(LessonRow {
            id,
            course_id: request.course_id,
            position,
            title: request.title,
            media_upload_id: request.media_upload_id,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        })
    }
}
