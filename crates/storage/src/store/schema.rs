#![forbid(unsafe_code)]

use super::StoreError;
use rusqlite::Connection;

pub(crate) fn install_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        PRAGMA journal_mode=WAL;
        PRAGMA synchronous=NORMAL;

        CREATE TABLE IF NOT EXISTS meta (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counters (
          name TEXT PRIMARY KEY,
          value INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
          id TEXT PRIMARY KEY,
          email TEXT NOT NULL UNIQUE,
          password_hash TEXT NOT NULL,
          role TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
          token TEXT PRIMARY KEY,
          user_id TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          expires_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS courses (
          id TEXT PRIMARY KEY,
          title TEXT NOT NULL,
          summary TEXT,
          price_cents INTEGER NOT NULL,
          published INTEGER NOT NULL DEFAULT 0,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS lessons (
          id TEXT PRIMARY KEY,
          course_id TEXT NOT NULL,
          position INTEGER NOT NULL,
          title TEXT NOT NULL,
          media_upload_id TEXT,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS enrollments (
          user_id TEXT NOT NULL,
          course_id TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          PRIMARY KEY (user_id, course_id)
        );

        CREATE TABLE IF NOT EXISTS lesson_progress (
          user_id TEXT NOT NULL,
          lesson_id TEXT NOT NULL,
          completed_at_ms INTEGER NOT NULL,
          PRIMARY KEY (user_id, lesson_id)
        );

        CREATE TABLE IF NOT EXISTS lesson_notes (
          seq INTEGER PRIMARY KEY AUTOINCREMENT,
          user_id TEXT NOT NULL,
          lesson_id TEXT NOT NULL,
          body TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS uploads (
          id TEXT PRIMARY KEY,
          owner_user_id TEXT NOT NULL,
          filename TEXT NOT NULL,
          content_type TEXT NOT NULL,
          object_key TEXT NOT NULL,
          status TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS audit_log (
          seq INTEGER PRIMARY KEY AUTOINCREMENT,
          ts_ms INTEGER NOT NULL,
          actor_user_id TEXT,
          action TEXT NOT NULL,
          entity TEXT NOT NULL,
          summary TEXT NOT NULL,
          payload_json TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS notifications (
          seq INTEGER PRIMARY KEY AUTOINCREMENT,
          user_id TEXT NOT NULL,
          kind TEXT NOT NULL,
          body TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          read_at_ms INTEGER
        );

        CREATE INDEX IF NOT EXISTS idx_lessons_course_position
          ON lessons(course_id, position);
        CREATE INDEX IF NOT EXISTS idx_sessions_user ON sessions(user_id);
        CREATE INDEX IF NOT EXISTS idx_notes_user_lesson
          ON lesson_notes(user_id, lesson_id);
        CREATE INDEX IF NOT EXISTS idx_notifications_user
          ON notifications(user_id, read_at_ms);
        CREATE INDEX IF NOT EXISTS idx_audit_ts ON audit_log(ts_ms);
        "#,
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO meta(key, value) VALUES ('schema_version', 'v1')",
        [],
    )?;
    Ok(())
}
