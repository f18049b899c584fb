#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{
    op_error, op_ok, optional_bool, optional_i64, optional_nullable_string, optional_string,
    optional_usize, require_admin, require_bool, require_entity_id, require_session, require_string,
    store_error,
};
use cl_core::model::Role;
use cl_storage::{CourseCreateRequest, CourseEditRequest, StoreError};
use serde_json::{Value, json};

use super::views::course_json;

const DEFAULT_PAGE: usize = 50;

pub(crate) fn course_create(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_admin(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let summary = match optional_string(args, "summary") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let price_cents = match optional_i64(args, "price_cents") {
        Ok(v) => v.unwrap_or(0),
        Err(resp) => return resp,
    };

    match server.store.course_create(CourseCreateRequest {
        title,
        summary,
        price_cents,
        actor_user_id: Some(session.user_id),
    }) {
        Ok(course) => op_ok("course_create", course_json(&course)),
        Err(err) => store_error(err),
    }
}

pub(crate) fn course_edit(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_admin(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match require_entity_id(args, "course") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match optional_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let summary = match optional_nullable_string(args, "summary") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let price_cents = match optional_i64(args, "price_cents") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.course_edit(CourseEditRequest {
        course_id,
        title,
        summary,
        price_cents,
        actor_user_id: Some(session.user_id),
    }) {
        Ok(course) => op_ok("course_edit", course_json(&course)),
        Err(err) => store_error(err),
    }
}

pub(crate) fn course_publish(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_admin(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match require_entity_id(args, "course") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let published = match require_bool(args, "published") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if let Err(err) = server
        .store
        .course_publish(&course_id, published, Some(&session.user_id))
    {
        return store_error(err);
    }
    match server.store.course_get(&course_id) {
        Ok(Some(course)) => op_ok("course_publish", course_json(&course)),
        Ok(None) => store_error(StoreError::UnknownId),
        Err(err) => store_error(err),
    }
}

pub(crate) fn course_list(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let include_unpublished = match optional_bool(args, "include_unpublished") {
        Ok(v) => v.unwrap_or(false),
        Err(resp) => return resp,
    };
    if include_unpublished && session.role != Role::Admin {
        return op_error("FORBIDDEN", "Only admins can list unpublished courses");
    }
    let limit = match optional_usize(args, "limit") {
        Ok(v) => v.unwrap_or(DEFAULT_PAGE),
        Err(resp) => return resp,
    };
    let offset = match optional_usize(args, "offset") {
        Ok(v) => v.unwrap_or(0),
        Err(resp) => return resp,
    };

    match server.store.course_list(include_unpublished, limit, offset) {
        Ok(courses) => op_ok(
            "course_list",
            json!({ "courses": courses.iter().map(course_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}

pub(crate) fn course_get(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match require_entity_id(args, "course") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server.store.course_get(&course_id) {
        // Unpublished courses stay invisible to learners, same as missing.
        Ok(Some(course)) if course.published || session.role == Role::Admin => {
            op_ok("course_get", course_json(&course))
        }
        Ok(_) => store_error(StoreError::UnknownId),
        Err(err) => store_error(err),
    }
}
