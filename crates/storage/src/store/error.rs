#![forbid(unsafe_code)]

use rusqlite::ErrorCode;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    /// The database writer lock could not be acquired within the busy
    /// timeout. The whole operation rolled back and may be retried.
    Busy,
    InvalidInput(&'static str),
    UnknownId,
    EmailTaken,
    SessionExpired,
    NotEnrolled,
    ReorderMismatch {
        expected: usize,
        actual: usize,
    },
    ReorderUnknownId {
        lesson_id: String,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::Busy => write!(f, "database busy; retry"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::UnknownId => write!(f, "unknown id"),
            Self::EmailTaken => write!(f, "email already registered"),
            Self::SessionExpired => write!(f, "session expired"),
            Self::NotEnrolled => write!(f, "not enrolled in this course"),
            Self::ReorderMismatch { expected, actual } => write!(
                f,
                "reorder list size mismatch (expected={expected}, actual={actual})"
            ),
            Self::ReorderUnknownId { lesson_id } => {
                write!(f, "reorder list names unknown lesson (lesson_id={lesson_id})")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, _) = &value
            && matches!(code.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        {
            return Self::Busy;
        }
        Self::Sql(value)
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, message) => {
            code.code == ErrorCode::ConstraintViolation
                || message.as_deref().is_some_and(|value| {
                    value.contains("UNIQUE constraint failed")
                        || value.contains("PRIMARY KEY constraint failed")
                })
        }
        _ => false,
    }
}
