#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::{
    op_error, op_ok, optional_i64, optional_nullable_string, optional_string, require_admin,
    require_entity_id, require_session, require_string, require_string_list, store_error,
};
use cl_core::ids::is_plausible_entity_id;
use cl_core::model::Role;
use cl_storage::{LessonCreateRequest, LessonUpdateRequest, LessonsReorderRequest, StoreError};
use serde_json::{Value, json};

use super::views::lesson_json;

pub(crate) fn lesson_create(
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
    let title = match require_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let position = match optional_i64(args, "position") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let media_upload_id = match optional_string(args, "media") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Some(id) = &media_upload_id
        && !is_plausible_entity_id(id)
    {
        return op_error("INVALID_INPUT", "media is not a valid id");
    }

    match server.store.lesson_create(LessonCreateRequest {
        course_id,
        title,
        media_upload_id,
        position,
        actor_user_id: Some(session.user_id),
    }) {
        Ok(lesson) => op_ok("lesson_create", lesson_json(&lesson)),
        Err(err) => store_error(err),
    }
}

pub(crate) fn lesson_update(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_admin(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let lesson_id = match require_entity_id(args, "lesson") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let title = match optional_string(args, "title") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let position = match optional_i64(args, "position") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let media_upload_id = match optional_nullable_string(args, "media") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Some(Some(id)) = &media_upload_id
        && !is_plausible_entity_id(id)
    {
        return op_error("INVALID_INPUT", "media is not a valid id");
    }

    match server.store.lesson_update(LessonUpdateRequest {
        lesson_id,
        title,
        media_upload_id,
        position,
        actor_user_id: Some(session.user_id),
    }) {
        Ok(lesson) => op_ok("lesson_update", lesson_json(&lesson)),
        Err(err) => store_error(err),
    }
}

pub(crate) fn lesson_delete(
    server: &mut ApiServer,
    args: &serde_json::Map<String, Value>,
) -> Value {
    let session = match require_admin(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let lesson_id = match require_entity_id(args, "lesson") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match server
        .store
        .lesson_delete(&lesson_id, Some(&session.user_id))
    {
        Ok(()) => op_ok("lesson_delete", json!({ "deleted": lesson_id })),
        Err(err) => store_error(err),
    }
}

pub(crate) fn lessons_reorder(
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
    let order = match require_string_list(args, "order") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if order.iter().any(|id| !is_plausible_entity_id(id)) {
        return op_error("INVALID_INPUT", "order contains an invalid id");
    }

    match server.store.lessons_reorder(LessonsReorderRequest {
        course_id,
        order,
        actor_user_id: Some(session.user_id),
    }) {
        Ok(lessons) => op_ok(
            "lessons_reorder",
            json!({ "lessons": lessons.iter().map(lesson_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}

pub(crate) fn lessons_list(server: &mut ApiServer, args: &serde_json::Map<String, Value>) -> Value {
    let session = match require_session(server, args) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let course_id = match require_entity_id(args, "course") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // Learners only see lessons of published courses.
    if session.role != Role::Admin {
        match server.store.course_get(&course_id) {
            Ok(Some(course)) if course.published => {}
            Ok(_) => return store_error(StoreError::UnknownId),
            Err(err) => return store_error(err),
        }
    }

    match server.store.lessons_list(&course_id) {
        Ok(lessons) => op_ok(
            "lessons_list",
            json!({ "lessons": lessons.iter().map(lesson_json).collect::<Vec<_>>() }),
        ),
        Err(err) => store_error(err),
    }
}
