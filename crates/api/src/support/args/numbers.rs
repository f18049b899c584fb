#![forbid(unsafe_code)]

use crate::support::op_error;
use serde_json::Value;

pub(crate) fn require_i64(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<i64, Value> {
    match optional_i64(args, key)? {
        Some(v) => Ok(v),
        None => Err(op_error("INVALID_INPUT", &format!("{key} is required"))),
    }
}

pub(crate) fn optional_i64(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<i64>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| op_error("INVALID_INPUT", &format!("{key} must be an integer"))),
        _ => Err(op_error(
            "INVALID_INPUT",
            &format!("{key} must be an integer"),
        )),
    }
}

pub(crate) fn optional_usize(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Option<usize>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_u64().map(|v| v as usize).map(Some).ok_or_else(|| {
            op_error(
                "INVALID_INPUT",
                &format!("{key} must be a non-negative integer"),
            )
        }),
        _ => Err(op_error(
            "INVALID_INPUT",
            &format!("{key} must be a non-negative integer"),
        )),
    }
}
