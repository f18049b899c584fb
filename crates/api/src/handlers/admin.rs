#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{op_ok, optional_usize, require_admin, store_error};
use serde_json::{Value, json};

use super::views::{audit_json, user_json};

const DEFAULT_PAGE: usize = 50;

pub(crate) fn users_list(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    if let Err(resp) = require_admin(server, args) {
        return resp;
    }
    let limit = match optional_usize(args, "limit") {
        Ok(v) => v.unwrap_or(DEFAULT_PAGE),
        Err(resp) => return resp,
    };
    let offset = match optional_usize(args, "offset") {
        Ok(v) => v.unwrap_or(0),
        Err(resp) => return resp,
    };

    match server.store.users_list(limit, offset) {
        Ok(users) => op_ok(
            "users_list",
            json!({ "users": users.iter().map(user_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}

pub(crate) fn audit_list(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    if let Err(resp) = require_admin(server, args) {
        return resp;
    }
    let limit = match optional_usize(args, "limit") {
        Ok(v) => v.unwrap_or(DEFAULT_PAGE),
        Err(resp) => return resp,
    };
    let offset = match optional_usize(args, "offset") {
        Ok(v) => v.unwrap_or(0),
        Err(resp) => return resp,
    };

    match server.store.audit_list(limit, offset) {
        Ok(rows) => op_ok(
            "audit_list",
            json!({ "entries": rows.iter().map(audit_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}
