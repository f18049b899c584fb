#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{
    op_ok, require_entity_id, require_i64, require_session, require_string, store_error,
};
use cl_storage::NoteAddRequest;
use serde_json::{Value, json};

use super::views::note_json;

pub(crate) fn note_add(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let lesson_id = match require_entity_id(args, "lesson") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let body = match require_string(args, "body") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.note_add(NoteAddRequest {
        user_id: session.user_id,
        lesson_id,
        body,
    }) {
        Ok(note) => op_ok("note_add", note_json(&note)),
        Err(err) => store_error(err),
    }
}

pub(crate) fn notes_list(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let lesson_id = match require_entity_id(args, "lesson") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.notes_list(&session.user_id, &lesson_id) {
        Ok(notes) => op_ok(
            "notes_list",
            json!({ "notes": notes.iter().map(note_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}

pub(crate) fn note_delete(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let seq = match require_i64(args, "seq") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.note_delete(&session.user_id, seq) {
        Ok(()) => op_ok("note_delete", json!({ "deleted": seq })),
        Err(err) => store_error(err),
    }
}
