#![forbid(unsafe_code)]

use super::*;
use crate::store::*;
use rusqlite::{TransactionBehavior, params};
use serde_json::json;

impl SqliteStore {
    /// Deletes a lesson and compacts the remaining siblings back to a dense
    /// 1..N ordering. The learner progress and note rows that referenced the
    /// lesson are removed in the same transaction.
    pub fn lesson_delete(
        &mut self,
        lesson_id: &str,
        actor_user_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some((course_id, position)) = lesson_locate_tx(&tx, lesson_id)? else {
            return Err(StoreError::UnknownId);
        };

        tx.execute("DELETE FROM lessons WHERE id=?1", params![lesson_id])?;
        tx.execute(
            "UPDATE lessons SET position = position - 1 WHERE course_id = ?1 AND position > ?2",
            params![course_id, position],
        )?;
        tx.execute(
            "DELETE FROM lesson_progress WHERE lesson_id=?1",
            params![lesson_id],
        )?;
        tx.execute(
            "DELETE FROM lesson_notes WHERE lesson_id=?1",
            params![lesson_id],
        )?;

        tx.commit()?;
        self.record_audit(
            actor_user_id,
            "lesson_delete",
            lesson_id,
            format!("deleted lesson at position {position}"),
            json!({ "course_id": course_id, "position": position }),
        );
        Ok(())
    }
}
