#![forbid(unsafe_code)]

use super::*;
use cl_core::model::Role;
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    pub fn session_create(&mut self, request: SessionCreateRequest) -> Result<SessionRow, StoreError> {
        if request.token.is_empty() {
            return Err(StoreError::InvalidInput("session token must not be empty"));
        }
        if request.ttl_ms <= 0 {
            return Err(StoreError::InvalidInput("session ttl must be positive"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let role_raw = tx
            .query_row(
                "SELECT role FROM users WHERE id=?1",
                params![request.user_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        let Some(role_raw) = role_raw else {
            return Err(StoreError::UnknownId);
        };
        let role =
            Role::from_str(&role_raw).ok_or(StoreError::InvalidInput("corrupt role column"))?;

        let expires_at_ms = now_ms.saturating_add(request.ttl_ms);
        tx.execute(
            r#"
            INSERT INTO sessions(token, user_id, created_at_ms, expires_at_ms)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![request.token, request.user_id, now_ms, expires_at_ms],
        )?;

        tx.commit()?;
        Ok(SessionRow {
            token: request.token,
            user_id: request.user_id,
            role,
            expires_at_ms,
        })
    }

    /// Resolves a token to its session, removing it when already expired so
    /// stale tokens cannot accumulate.
    pub fn session_lookup(&mut self, token: &str) -> Result<SessionRow, StoreError> {
        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let row = tx
            .query_row(
                r#"
                SELECT s.user_id, s.expires_at_ms, u.role
                FROM sessions s
                JOIN users u ON u.id = s.user_id
                WHERE s.token = ?1
                "#,
                params![token],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((user_id, expires_at_ms, role_raw)) = row else {
            return Err(StoreError::UnknownId);
        };

        if expires_at_ms <= now_ms {
            tx.execute("DELETE FROM sessions WHERE token=?1", params![token])?;
            tx.commit()?;
            return Err(StoreError::SessionExpired);
        }

        let role =
            Role::from_str(&role_raw).ok_or(StoreError::InvalidInput("corrupt role column"))?;
        tx.commit()?;
        Ok(SessionRow {
            token: token.to_string(),
            user_id,
            role,
            expires_at_ms,
        })
    }

    pub fn session_delete(&mut self, token: &str) -> Result<bool, StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute("DELETE FROM sessions WHERE token=?1", params![token])?;
        tx.commit()?;
        Ok(deleted > 0)
    }
}
