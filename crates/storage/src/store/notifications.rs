#![forbid(unsafe_code)]

use super::*;
use rusqlite::{Transaction, params};

pub(crate) fn notify_tx(
    tx: &Transaction<'_>,
    user_id: &str,
    kind: &str,
    body: &str,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        r#"
        INSERT INTO notifications(user_id, kind, body, created_at_ms, read_at_ms)
        VALUES (?1, ?2, ?3, ?4, NULL)
        "#,
        params![user_id, kind, body, now_ms],
    )?;
    Ok(())
}

/// Fans a notification out to every user enrolled in the course, inside the
/// caller's transaction.
pub(crate) fn notify_enrolled_tx(
    tx: &Transaction<'_>,
    course_id: &str,
    kind: &str,
    body: &str,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        r#"
        INSERT INTO notifications(user_id, kind, body, created_at_ms, read_at_ms)
        SELECT user_id, ?2, ?3, ?4, NULL FROM enrollments WHERE course_id = ?1
        "#,
        params![course_id, kind, body, now_ms],
    )?;
    Ok(())
}

impl SqliteStore {
    pub fn notifications_list(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<NotificationRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT seq, kind, body, created_at_ms, read_at_ms
            FROM notifications
            WHERE user_id = ?1
            ORDER BY seq DESC
            LIMIT ?2
            "#,
        )?;
        let rows = stmt.query_map(params![user_id, limit as i64], |row| {
            Ok(NotificationRow {
                seq: row.get(0)?,
                kind: row.get(1)?,
                body: row.get(2)?,
                created_at_ms: row.get(3)?,
                read: row.get::<_, Option<i64>>(4)?.is_some(),
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// The dashboard badge: count of unread notifications.
    pub fn notifications_unread_count(&self, user_id: &str) -> Result<i64, StoreError> {
        Ok(self.conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE user_id=?1 AND read_at_ms IS NULL",
            params![user_id],
            |row| row.get(0),
        )?)
    }

    pub fn notifications_mark_read(&mut self, user_id: &str) -> Result<usize, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;
        let changed = tx.execute(
            "UPDATE notifications SET read_at_ms = ?2 WHERE user_id = ?1 AND read_at_ms IS NULL",
            params![user_id, now_ms],
        )?;
        tx.commit()?;
        Ok(changed)
    }
}
