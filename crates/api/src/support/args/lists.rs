#![forbid(unsafe_code)]

use crate::support::op_error;
use serde_json::Value;

pub(crate) fn require_string_list(
    args: &serde_json::Map<String, Value>,
    key: &str,
) -> Result<Vec<String>, Value> {
    let Some(value) = args.get(key) else {
        return Err(op_error("INVALID_INPUT", &format!("{key} is required")));
    };
    let Some(items) = value.as_array() else {
        return Err(op_error(
            "INVALID_INPUT",
            &format!("{key} must be an array of strings"),
        ));
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        let Some(s) = item.as_str() else {
            return Err(op_error(
                "INVALID_INPUT",
                &format!("{key} must be an array of strings"),
            ));
        };
        out.push(s.to_string());
    }
    Ok(out)
}
