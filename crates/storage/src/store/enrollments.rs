#![forbid(unsafe_code)]

use super::*;
use crate::store::notifications::notify_tx;
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    /// Enrolls a user into a published course. Unpublished courses read as
    /// unknown, same as the catalog views. Re-enrolling is a no-op; the
    /// composite primary key makes duplicates impossible.
    pub fn enroll(&mut self, user_id: &str, course_id: &str) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let course = tx
            .query_row(
                "SELECT title, published FROM courses WHERE id=?1",
                params![course_id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()?;
        let Some((title, published)) = course else {
            return Err(StoreError::UnknownId);
        };
        if published == 0 {
            return Err(StoreError::UnknownId);
        }

        let inserted = tx.execute(
            "INSERT OR IGNORE INTO enrollments(user_id, course_id, created_at_ms) VALUES (?1, ?2, ?3)",
            params![user_id, course_id, now_ms],
        )?;
        if inserted > 0 {
            notify_tx(
                &tx,
                user_id,
                "enrolled",
                &format!("You are enrolled in \"{title}\""),
                now_ms,
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// The learner dashboard view: every enrollment with its progress
    /// summary (completed lessons out of total).
    pub fn enrollments_list(&self, user_id: &str) -> Result<Vec<EnrollmentRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT e.course_id,
                   c.title,
                   e.created_at_ms,
                   (SELECT COUNT(*) FROM lesson_progress p
                    JOIN lessons l ON l.id = p.lesson_id
                    WHERE p.user_id = e.user_id AND l.course_id = e.course_id),
                   (SELECT COUNT(*) FROM lessons l WHERE l.course_id = e.course_id)
            FROM enrollments e
            JOIN courses c ON c.id = e.course_id
            WHERE e.user_id = ?1
            ORDER BY e.created_at_ms ASC, e.course_id ASC
            "#,
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(EnrollmentRow {
                course_id: row.get(0)?,
                course_title: row.get(1)?,
                enrolled_at_ms: row.get(2)?,
                completed_lessons: row.get(3)?,
                total_lessons: row.get(4)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn is_enrolled(&self, user_id: &str, course_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT 1 FROM enrollments WHERE user_id=?1 AND course_id=?2",
                params![user_id, course_id],
                |_| Ok(()),
            )
            .optional()?
            .is_some())
    }
}
