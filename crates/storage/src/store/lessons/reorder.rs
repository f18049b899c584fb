#![forbid(unsafe_code)]

use super::*;
use crate::store::*;
use rusqlite::{TransactionBehavior, params};
use serde_json::json;
use std::collections::BTreeSet;

impl SqliteStore {
    /// Replaces the full ordering of a course's lessons.
    ///
    /// The supplied list must be a bijection onto the current membership:
    /// same size, every id present exactly once. Anything else is rejected
    /// wholesale before a single position is rewritten.
    pub fn lessons_reorder(
        &mut self,
        request: LessonsReorderRequest,
    ) -> Result<Vec<LessonRow>, StoreError> {
        let now_ms = now_ms();
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if !course_exists_tx(&tx, &request.course_id)? {
            return Err(StoreError::UnknownId);
        }

        let mut stmt = tx.prepare(
            "SELECT id FROM lessons WHERE course_id=?1 ORDER BY position ASC",
        )?;
        let members = stmt
            .query_map(params![request.course_id], |row| row.get::<_, String>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;
        drop(stmt);

        if request.order.len() != members.len() {
            return Err(StoreError::ReorderMismatch {
                expected: members.len(),
                actual: request.order.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for lesson_id in &request.order {
            if !members.contains(lesson_id) {
                return Err(StoreError::ReorderUnknownId {
                    lesson_id: lesson_id.clone(),
                });
            }
            if !seen.insert(lesson_id.as_str()) {
                return Err(StoreError::InvalidInput("duplicate lesson id in order"));
            }
        }

        for (index, lesson_id) in request.order.iter().enumerate() {
            tx.execute(
                "UPDATE lessons SET position = ?3, updated_at_ms = ?4 WHERE course_id = ?1 AND id = ?2",
                params![request.course_id, lesson_id, (index as i64) + 1, now_ms],
            )?;
        }

        tx.commit()?;
        self.record_audit(
            request.actor_user_id.as_deref(),
            "lessons_reorder",
            &request.course_id,
            format!("reordered {} lessons", request.order.len()),
            json!({ "order": request.order }),
        );

        self.lessons_list(&request.course_id)
    }
}
