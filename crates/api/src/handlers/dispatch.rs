#![forbid(unsafe_code)]

use crate::ApiServer;
use crate::support::op_error;
use serde_json::Value;

use super::{admin, auth, courses, learner, lessons, media, notes};

type Handler = fn(&mut ApiServer, &serde_json::Map<String, Value>) -> Value;

fn lookup(name: &str) -> Option<Handler> {
    Some(match name {
        "signup" => auth::signup,
        "login" => auth::login,
        "logout" => auth::logout,
        "whoami" => auth::whoami,
        "course_create" => courses::course_create,
        "course_edit" => courses::course_edit,
        "course_publish" => courses::course_publish,
        "course_list" => courses::course_list,
        "course_get" => courses::course_get,
        "lesson_create" => lessons::lesson_create,
        "lesson_update" => lessons::lesson_update,
        "lesson_delete" => lessons::lesson_delete,
        "lessons_reorder" => lessons::lessons_reorder,
        "lessons_list" => lessons::lessons_list,
        "enroll" => learner::enroll,
        "my_courses" => learner::my_courses,
        "progress_set" => learner::progress_set,
        "note_add" => notes::note_add,
        "notes_list" => notes::notes_list,
        "note_delete" => notes::note_delete,
        "upload_register" => media::upload_register,
        "users_list" => admin::users_list,
        "audit_list" => admin::audit_list,
        "notifications" => learner::notifications,
        "notifications_read" => learner::notifications_read,
        _ => return None,
    })
}

pub(crate) fn dispatch_tool(server: &mut ApiServer, name: &str, args: Value) -> Option<Value> {
    let handler = lookup(name)?;
    let Some(args) = args.as_object() else {
        return Some(op_error("INVALID_INPUT", "arguments must be an object"));
    };
    Some(handler(server, args))
}

#[cfg(test)]
pub(crate) fn dispatch_tool_names() -> &'static [&'static str] {
    &[
        "signup",
        "login",
        "logout",
        "whoami",
        "course_create",
        "course_edit",
        "course_publish",
        "course_list",
        "course_get",
        "lesson_create",
        "lesson_update",
        "lesson_delete",
        "lessons_reorder",
        "lessons_list",
        "enroll",
        "my_courses",
        "progress_set",
        "note_add",
        "notes_list",
        "note_delete",
        "upload_register",
        "users_list",
        "audit_list",
        "notifications",
        "notifications_read",
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    #[test]
    fn tool_definitions_and_dispatch_are_in_sync() {
        let mut defined = BTreeSet::<String>::new();
        for tool in crate::server::tool_definitions() {
            let Some(name) = tool.get("name").and_then(|v| v.as_str()) else {
                continue;
            };
            defined.insert(name.to_string());
        }

        let mut dispatched = BTreeSet::<String>::new();
        for name in super::dispatch_tool_names() {
            assert!(
                super::lookup(name).is_some(),
                "name list entry without a handler: {name}"
            );
            dispatched.insert((*name).to_string());
        }

        let missing_in_definitions = dispatched.difference(&defined).cloned().collect::<Vec<_>>();
        let missing_in_dispatch = defined.difference(&dispatched).cloned().collect::<Vec<_>>();
        assert!(
            missing_in_definitions.is_empty() && missing_in_dispatch.is_empty(),
            "tool dispatch/definitions mismatch\n  dispatch-only: {missing_in_definitions:?}\n  definitions-only: {missing_in_dispatch:?}"
        );
    }
}
