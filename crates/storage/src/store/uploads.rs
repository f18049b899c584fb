#![forbid(unsafe_code)]

use super::*;
use cl_core::model::UploadStatus;
use rusqlite::{OptionalExtension, Transaction, params};

impl SqliteStore {
    /// Registers an upload intent and mints its object-storage key. The
    /// actual byte transfer happens out of band against that key; this row
    /// only tracks the reference and its lifecycle.
    pub fn upload_register(
        &mut self,
        request: UploadRegisterRequest,
    ) -> Result<UploadRow, StoreError> {
        if request.filename.trim().is_empty() {
            return Err(StoreError::InvalidInput("filename must not be empty"));
        }
        if request.content_type.trim().is_empty() {
            return Err(StoreError::InvalidInput("content_type must not be empty"));
        }

        let now_ms = now_ms();
        let tx = self.conn.transaction()?;

        let seq = next_counter_tx(&tx, "upload_seq")?;
        let id = format!("UPL-{seq:03}");
        let object_key = format!("media/{id}/{}", sanitize_filename(&request.filename));

        tx.execute(
            r#"
            INSERT INTO uploads(id, owner_user_id, filename, content_type, object_key, status, created_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                id,
                request.owner_user_id,
                request.filename,
                request.content_type,
                object_key,
                UploadStatus::Pending.as_str(),
                now_ms
            ],
        )?;

        tx.commit()?;
        Ok(UploadRow {
            id,
            owner_user_id: request.owner_user_id,
            filename: request.filename,
            content_type: request.content_type,
            object_key,
            status: UploadStatus::Pending.as_str().to_string(),
            created_at_ms: now_ms,
        })
    }

    pub fn upload_get(&self, upload_id: &str) -> Result<Option<UploadRow>, StoreError> {
        Ok(self
            .conn
            .query_row(
                r#"
                SELECT id, owner_user_id, filename, content_type, object_key, status, created_at_ms
                FROM uploads
                WHERE id = ?1
                "#,
                params![upload_id],
                |row| {
                    Ok(UploadRow {
                        id: row.get(0)?,
                        owner_user_id: row.get(1)?,
                        filename: row.get(2)?,
                        content_type: row.get(3)?,
                        object_key: row.get(4)?,
                        status: row.get(5)?,
                        created_at_ms: row.get(6)?,
                    })
                },
            )
            .optional()?)
    }
}

/// Marks an upload as attached to a lesson. Rejects unknown upload ids so a
/// lesson can never reference media that was not registered first.
pub(crate) fn attach_upload_tx(tx: &Transaction<'_>, upload_id: &str) -> Result<(), StoreError> {
    let changed = tx.execute(
        "UPDATE uploads SET status = ?2 WHERE id = ?1",
        params![upload_id, UploadStatus::Attached.as_str()],
    )?;
    if changed == 0 {
        return Err(StoreError::InvalidInput("unknown media upload id"));
    }
    Ok(())
}

fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
