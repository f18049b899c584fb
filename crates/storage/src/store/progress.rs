#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;

impl SqliteStore {
    /// Marks a lesson complete or clears the completion. The user must be
    /// enrolled in the lesson's course.
    pub fn progress_set(
        &mut self,
        user_id: &str,
        lesson_id: &str,
        completed: bool,
    ) -> Result<(), StoreError> {
        let Some(lesson) = self.lesson_get(lesson_id)? else {
            return Err(StoreError::UnknownId);
        };
        if !self.is_enrolled(user_id, &lesson.course_id)? {
            return Err(StoreError::NotEnrolled);
        }

        if completed {
            self.conn.execute(
                r#"
                INSERT INTO lesson_progress(user_id, lesson_id, completed_at_ms)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(user_id, lesson_id) DO NOTHING
                "#,
                params![user_id, lesson_id, now_ms()],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM lesson_progress WHERE user_id=?1 AND lesson_id=?2",
                params![user_id, lesson_id],
            )?;
        }
        Ok(())
    }

    /// Ids of the user's completed lessons within one course, in course
    /// order.
    pub fn completed_lessons(
        &self,
        user_id: &str,
        course_id: &str,
    ) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT l.id
            FROM lesson_progress p
            JOIN lessons l ON l.id = p.lesson_id
            WHERE p.user_id = ?1 AND l.course_id = ?2
            ORDER BY l.position ASC
            "#,
        )?;
        let rows = stmt.query_map(params![user_id, course_id], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
