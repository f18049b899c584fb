#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{op_error, store_error};
use cl_core::model::Role;
use cl_storage::{SessionRow, StoreError};
use serde_json::Value;

/// Resolves the `session` argument into a live session. Missing, unknown,
/// and expired tokens all come back as `UNAUTHORIZED`.
pub(crate) fn require_session(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Result<SessionRow, Value> {
    let Some(token) = args.get("session").and_then(|v| v.as_str()) else {
        return Err(op_error("UNAUTHORIZED", "session is required"));
    };
    match server.store.session_lookup(token) {
        Ok(session) => Ok(session),
        Err(StoreError::UnknownId) => Err(op_error("UNAUTHORIZED", "Unknown session token")),
        Err(StoreError::SessionExpired) => Err(op_error("UNAUTHORIZED", "Session expired")),
        Err(err) => Err(store_error(err)),
    }
}

pub(crate) fn require_admin(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Result<SessionRow, Value> {
    let session = require_session(server, args)?;
    if session.role != Role::Admin {
        return Err(op_error("FORBIDDEN", "This tool requires the admin role"));
    }
    Ok(session)
}
