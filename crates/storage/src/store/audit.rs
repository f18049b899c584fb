#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;

impl SqliteStore {
    /// Appends one audit record in its own transaction. Callers that must
    /// not fail on audit errors go through `record_audit`.
    pub fn audit_append(
        &mut self,
        actor_user_id: Option<&str>,
        action: &str,
        entity: &str,
        summary: &str,
        payload: &serde_json::Value,
    ) -> Result<i64, StoreError> {
        let now_ms = now_ms();
        let payload_json = serde_json::to_string(payload)
            .map_err(|_| StoreError::InvalidInput("unserializable audit payload"))?;

        let tx = self.conn.transaction()?;
        tx.execute(
            r#"
            INSERT INTO audit_log(ts_ms, actor_user_id, action, entity, summary, payload_json)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![now_ms, actor_user_id, action, entity, summary, payload_json],
        )?;
        let seq = tx.last_insert_rowid();
        tx.commit()?;
        Ok(seq)
    }

    pub fn audit_list(&self, limit: usize, offset: usize) -> Result<Vec<AuditRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT seq, ts_ms, actor_user_id, action, entity, summary, payload_json
            FROM audit_log
            ORDER BY seq DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], |row| {
            Ok(AuditRow {
                seq: row.get(0)?,
                ts_ms: row.get(1)?,
                actor_user_id: row.get(2)?,
                action: row.get(3)?,
                entity: row.get(4)?,
                summary: row.get(5)?,
                payload_json: row.get(6)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
