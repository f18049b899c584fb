#![forbid(unsafe_code)]

use super::*;
use rusqlite::{OptionalExtension, Row, params};
use serde_json::json;

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<CourseRow> {
    Ok(CourseRow {
        id: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        price_cents: row.get(3)?,
        published: row.get::<_, i64>(4)? != 0,
        created_at_ms: row.get(5)?,
        updated_at_ms: row.get(6)?,
    })
}

const COURSE_COLUMNS: &str =
    "id, title, summary, price_cents, published, created_at_ms, updated_at_ms";

impl SqliteStore {
    pub fn course_create(&mut self, request: CourseCreateRequest) -> Result<CourseRow, StoreError> {
        if request.title.trim().is_empty() {
            return Err(StoreError::InvalidInput("title must not be empty"));
        }
        if request.price_cents < 0 {
            return Err(StoreError::InvalidInput("price_cents must not be negative"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let seq = next_counter_tx(&tx, "course_seq")?;
        let id = format!("COURSE-{seq:03}");

        tx.execute(
            r#"
            INSERT INTO courses(id, title, summary, price_cents, published, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
            "#,
            params![id, request.title, request.summary, request.price_cents, now_ms],
        )?;

        tx.commit()?;
        self.record_audit(
            request.actor_user_id.as_deref(),
            "course_create",
            &id,
            format!("created course \"{}\"", request.title),
            json!({ "title": request.title, "price_cents": request.price_cents }),
        );

        Ok(CourseRow {
            id,
            title: request.title,
            summary: request.summary,
            price_cents: request.price_cents,
            published: false,
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        })
    }

    pub fn course_edit(&mut self, request: CourseEditRequest) -> Result<CourseRow, StoreError> {
        if request.title.is_none() && request.summary.is_none() && request.price_cents.is_none() {
            return Err(StoreError::InvalidInput("no fields to edit"));
        }
        if let Some(title) = request.title.as_deref()
            && title.trim().is_empty()
        {
            return Err(StoreError::InvalidInput("title must not be empty"));
        }
        if let Some(price) = request.price_cents
            && price < 0
        {
            return Err(StoreError::InvalidInput("price_cents must not be negative"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let current = tx
            .query_row(
                &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id=?1"),
                params![request.course_id],
                course_from_row,
            )
            .optional()?;
        let Some(current) = current else {
            return Err(StoreError::UnknownId);
        };

        let title = request.title.unwrap_or(current.title);
        let summary = request.summary.unwrap_or(current.summary);
        let price_cents = request.price_cents.unwrap_or(current.price_cents);

        tx.execute(
            r#"
            UPDATE courses
            SET title = ?2, summary = ?3, price_cents = ?4, updated_at_ms = ?5
            WHERE id = ?1
            "#,
            params![request.course_id, title, summary, price_cents, now_ms],
        )?;

        tx.commit()?;
        self.record_audit(
            request.actor_user_id.as_deref(),
            "course_edit",
            &request.course_id,
            format!("edited course \"{title}\""),
            json!({ "title": title, "price_cents": price_cents }),
        );

        Ok(CourseRow {
            id: request.course_id,
            title,
            summary,
            price_cents,
            published: current.published,
            created_at_ms: current.created_at_ms,
            updated_at_ms: now_ms,
        })
    }

    pub fn course_publish(
        &mut self,
        course_id: &str,
        published: bool,
        actor_user_id: Option<&str>,
    ) -> Result<(), StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let changed = tx.execute(
            "UPDATE courses SET published = ?2, updated_at_ms = ?3 WHERE id = ?1",
            params![course_id, published as i64, now_ms],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }

        tx.commit()?;
        self.record_audit(
            actor_user_id,
            if published { "course_publish" } else { "course_unpublish" },
            course_id,
            format!("set published={published}"),
            json!({ "published": published }),
        );
        Ok(())
    }

    pub fn course_get(&self, course_id: &str) -> Result<Option<CourseRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id=?1"),
                params![course_id],
                course_from_row,
            )
            .optional()?)
    }

    /// Lists courses in creation order. The padded ids sort the same way
    /// only up to three digits, so paging goes by rowid. Unpublished
    /// courses are only visible when `include_unpublished` is set (the
    /// admin surface).
    pub fn course_list(
        &self,
        include_unpublished: bool,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CourseRow>, StoreError> {
        let sql = if include_unpublished {
            format!("SELECT {COURSE_COLUMNS} FROM courses ORDER BY rowid ASC LIMIT ?1 OFFSET ?2")
        } else {
            format!(
                "SELECT {COURSE_COLUMNS} FROM courses WHERE published=1 ORDER BY rowid ASC LIMIT ?1 OFFSET ?2"
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], course_from_row)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
