#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{op_ok, optional_string, require_admin, require_string, store_error};
use cl_storage::UploadRegisterRequest;
use serde_json::Value;

use super::views::upload_json;

pub(crate) fn upload_register(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_admin(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let filename = match require_string(args, "filename") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let content_type = match optional_string(args, "content_type") {
        Ok(v) => v.unwrap_or_else(|| "application/octet-stream".to_string()),
        Err(resp) => return resp,
    };

    match server.store.upload_register(UploadRegisterRequest {
        owner_user_id: session.user_id,
        filename,
        content_type,
    }) {
        Ok(upload) => op_ok("upload_register", upload_json(&upload)),
        Err(err) => store_error(err),
    }
}
