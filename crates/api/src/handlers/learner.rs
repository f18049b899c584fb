#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{
    op_ok, optional_usize, require_bool, require_entity_id, require_session, store_error,
};
use serde_json::{Value, json};

use super::views::{enrollment_json, notification_json};

const DEFAULT_PAGE: usize = 50;

pub(crate) fn enroll(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match require_entity_id(args, "course") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.enroll(&session.user_id, &course_id) {
        Ok(()) => op_ok("enroll", json!({ "course_id": course_id, "enrolled": true })),
        Err(err) => store_error(err),
    }
}

pub(crate) fn my_courses(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match server.store.enrollments_list(&session.user_id) {
        Ok(rows) => op_ok(
            "my_courses",
            json!({ "courses": rows.iter().map(enrollment_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}

pub(crate) fn progress_set(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let lesson_id = match require_entity_id(args, "lesson") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let completed = match require_bool(args, "completed") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server
        .store
        .progress_set(&session.user_id, &lesson_id, completed)
    {
        Ok(()) => op_ok(
            "progress_set",
            json!({ "lesson_id": lesson_id, "completed": completed }),
        ),
        Err(err) => store_error(err),
    }
}

pub(crate) fn notifications(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let limit = match optional_usize(args, "limit") {
        Ok(v) => v.unwrap_or(DEFAULT_PAGE),
        Err(resp) => return resp,
    };

    let rows = match server.store.notifications_list(&session.user_id, limit) {
        Ok(v) => v,
        Err(err) => return store_error(err),
    };
    let unread = match server.store.notifications_unread_count(&session.user_id) {
        Ok(v) => v,
        Err(err) => return store_error(err),
    };
    op_ok(
        "notifications",
        json!({
            "unread": unread,
            "notifications": rows.iter().map(notification_json).collect::<Vec<_>>(),
        }),
    )
}

pub(crate) fn notifications_read(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match server.store.notifications_mark_read(&session.user_id) {
        Ok(marked) => op_ok("notifications_read", json!({ "marked": marked })),
        Err(err) => store_error(err),
    }
}
