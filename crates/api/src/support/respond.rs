#![forbid(unsafe_code)]

use cl_storage::StoreError;
use serde_json::{Value, json};

pub(crate) fn op_ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "error": null
    })
}

pub(crate) fn op_error(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "intent": "error",
        "result": {},
        "error": { "code": code, "message": message.trim() }
    })
}

/// Store failures keep their shape across the wire: callers can branch on
/// the code without parsing messages. `RETRY` marks transient contention.
pub(crate) fn store_error(err: StoreError) -> Value {
    let (code, message) = match err {
        StoreError::InvalidInput(msg) => ("INVALID_INPUT", format!("Invalid input: {msg}")),
        StoreError::UnknownId => ("UNKNOWN_ID", "Unknown id".to_string()),
        StoreError::SessionExpired => ("UNAUTHORIZED", "Session expired".to_string()),
        StoreError::EmailTaken => ("CONFLICT", "Email already registered".to_string()),
        StoreError::NotEnrolled => ("FORBIDDEN", "Not enrolled in this course".to_string()),
        StoreError::ReorderMismatch { expected, actual } => (
            "CONFLICT",
            format!("Reorder mismatch: expected {expected} lesson ids, got {actual}"),
        ),
        StoreError::ReorderUnknownId { lesson_id } => (
            "CONFLICT",
            format!("Reorder refers to a lesson outside the course: {lesson_id}"),
        ),
        StoreError::Busy => ("RETRY", "Store busy, retry the call".to_string()),
        StoreError::Io(e) => ("STORE_ERROR", format!("IO: {e}")),
        StoreError::Sql(e) => ("STORE_ERROR", format!("SQL: {e}")),
    };
    op_error(code, &message)
}
