#![forbid(unsafe_code)]

use crate::support::op_error;
use serde_json::Value;

pub(crate) fn require_string(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, Value> {
    let Some(v) = args.get(key).and_then(|v| v.as_str()) else {
        return Err(op_error("INVALID_INPUT", &format!("{key} is required")));
    };
    Ok(v.to_string())
}

/// Id-shaped arguments ("COURSE-001", "LSN-042", ...). Caller-supplied ids
/// are shape-checked before they reach the store.
pub(crate) fn require_entity_id(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<String, Value> {
    let id = require_string(args, key)?;
    if !cl_core::ids::is_plausible_entity_id(&id) {
        return Err(op_error(
            "INVALID_INPUT",
            &format!("{key} is not a valid id"),
        ));
    }
    Ok(id)
}

pub(crate) fn optional_string(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<String>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::String(v) => Ok(Some(v.to_string())),
        _ => Err(op_error(
            "INVALID_INPUT",
            &format!("{key} must be a string"),
        )),
    }
}

/// Distinguishes "absent" from "explicitly null": `Some(None)` clears the
/// field, `None` leaves it untouched.
pub(crate) fn optional_nullable_string(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<Option<String>>, Value> {
    if !args.contains_key(key) {
        return Ok(None);
    }
    match args.get(key) {
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(v)) => Ok(Some(Some(v.to_string()))),
        Some(_) => Err(op_error(
            "INVALID_INPUT",
            &format!("{key} must be a string or null"),
        )),
        None => Ok(None),
    }
}
