#![forbid(unsafe_code)]

use crate::support::op_error;
use serde_json::Value;

pub(crate) fn require_bool(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<bool, Value> {
    match optional_bool(args, key)? {
        Some(v) => Ok(v),
        None => Err(op_error("INVALID_INPUT", &format!("{key} is required"))),
    }
}

pub(crate) fn optional_bool(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<bool>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Bool(v) => Ok(Some(*v)),
        _ => Err(op_error(
            "INVALID_INPUT",
            &format!("{key} must be a boolean"),
        )),
    }
}
