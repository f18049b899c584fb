#![forbid(unsafe_code)]

use super::error::is_constraint_violation;
use super::*;
use cl_core::model::Role;
use rusqlite::{OptionalExtension, Row, params};

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<(UserRow, String)> {
    let role_raw = row.get::<_, String>(3)?;
    Ok((
        UserRow {
            id: row.get(0)?,
            email: row.get(1)?,
            password_hash: row.get(2)?,
            role: Role::Learner,
            created_at_ms: row.get(4)?,
        },
        role_raw,
    ))
}

fn finish_user_row(parts: (UserRow, String)) -> Result<UserRow, StoreError> {
    let (mut user, role_raw) = parts;
    user.role = Role::from_str(&role_raw).ok_or(StoreError::InvalidInput("corrupt role column"))?;
    Ok(user)
}

impl SqliteStore {
    pub fn user_create(&mut self, request: UserCreateRequest) -> Result<UserRow, StoreError> {
        if request.password_hash.is_empty() {
            return Err(StoreError::InvalidInput("password hash must not be empty"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let seq = next_counter_tx(&tx, "user_seq")?;
        let id = format!("USR-{seq:03}");

        let insert = tx.execute(
            r#"
            INSERT INTO users(id, email, password_hash, role, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                id,
                request.email.as_str(),
                request.password_hash,
                request.role.as_str(),
                now_ms
            ],
        );
        if let Err(err) = insert {
            if is_constraint_violation(&err) {
                return Err(StoreError::EmailTaken);
            }
            return Err(err.into());
        }

        tx.commit()?;
        Ok(UserRow {
            id,
            email: request.email.as_str().to_string(),
            password_hash: request.password_hash,
            role: request.role,
            created_at_ms: now_ms,
        })
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRow>, StoreError> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT id, email, password_hash, role, created_at_ms
                FROM users
                WHERE email = ?1
                "#,
                params![email],
                user_from_row,
            )
            .optional()?;
        row.map(finish_user_row).transpose()
    }

    pub fn user_get(&self, user_id: &str) -> Result<Option<UserRow>, StoreError> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT id, email, password_hash, role, created_at_ms
                FROM users
                WHERE id = ?1
                "#,
                params![user_id],
                user_from_row,
            )
            .optional()?;
        row.map(finish_user_row).transpose()
    }

    pub fn users_count(&self) -> Result<i64, StoreError> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
    }

    pub fn users_list(&self, limit: usize, offset: usize) -> Result<Vec<UserRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, email, password_hash, role, created_at_ms
            FROM users
            ORDER BY rowid ASC
            LIMIT ?1 OFFSET ?2
            "#,
        )?;
        let rows = stmt.query_map(params![limit as i64, offset as i64], user_from_row)?;
        let mut out = Vec::new();
        for parts in rows {
            out.push(finish_user_row(parts?)?);
        }
        Ok(out)
    }
}
