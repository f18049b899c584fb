#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn tool(name: &str, description: &str, mut properties: Value, required: &[&str]) -> Value {
    // Every tool except signup/login runs under a session token.
    if !matches!(name, "signup" | "login") {
        if let Some(obj) = properties.as_object_mut() {
            obj.insert("session".to_string(), json!({ "type": "string" }));
        }
    }
    let mut required = required.iter().map(|s| json!(s)).collect::<Vec<_>>();
    if !matches!(name, "signup" | "login") {
        required.insert(0, json!("session"));
    }
    json!({
        "name": name,
        "description": description,
        "inputSchema": {
            "type": "object",
            "properties": properties,
            "required": required
        }
    })
}

fn paging() -> Value {
    json!({
        "limit": { "type": "integer" },
        "offset": { "type": "integer" }
    })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        tool(
            "signup",
            "Create an account and open a session. The first account becomes admin.",
            json!({
                "email": { "type": "string" },
                "password": { "type": "string" }
            }),
            &["email", "password"],
        ),
        tool(
            "login",
            "Open a session for an existing account.",
            json!({
                "email": { "type": "string" },
                "password": { "type": "string" }
            }),
            &["email", "password"],
        ),
        tool("logout", "Close the current session.", json!({}), &[]),
        tool(
            "whoami",
            "Current account, role and unread notification count.",
            json!({}),
            &[],
        ),
        tool(
            "course_create",
            "Create a course (admin).",
            json!({
                "title": { "type": "string" },
                "summary": { "type": "string" },
                "price_cents": { "type": "integer" }
            }),
            &["title"],
        ),
        tool(
            "course_edit",
            "Edit course fields; null summary clears it (admin).",
            json!({
                "course": { "type": "string" },
                "title": { "type": "string" },
                "summary": { "type": ["string", "null"] },
                "price_cents": { "type": "integer" }
            }),
            &["course"],
        ),
        tool(
            "course_publish",
            "Publish or unpublish a course (admin).",
            json!({
                "course": { "type": "string" },
                "published": { "type": "boolean" }
            }),
            &["course", "published"],
        ),
        tool(
            "course_list",
            "List courses. Learners see published only; admins may include unpublished.",
            {
                let mut props = paging();
                props["include_unpublished"] = json!({ "type": "boolean" });
                props
            },
            &[],
        ),
        tool(
            "course_get",
            "Fetch one course.",
            json!({ "course": { "type": "string" } }),
            &["course"],
        ),
        tool(
            "lesson_create",
            "Add a lesson. Omitted position appends at the end (admin).",
            json!({
                "course": { "type": "string" },
                "title": { "type": "string" },
                "position": { "type": "integer" },
                "media": { "type": "string" }
            }),
            &["course", "title"],
        ),
        tool(
            "lesson_update",
            "Edit or move a lesson; position is clamped to the course length (admin).",
            json!({
                "lesson": { "type": "string" },
                "title": { "type": "string" },
                "position": { "type": "integer" },
                "media": { "type": ["string", "null"] }
            }),
            &["lesson"],
        ),
        tool(
            "lesson_delete",
            "Delete a lesson; later siblings close the gap (admin).",
            json!({ "lesson": { "type": "string" } }),
            &["lesson"],
        ),
        tool(
            "lessons_reorder",
            "Replace a course's lesson ordering with a full permutation (admin).",
            json!({
                "course": { "type": "string" },
                "order": { "type": "array", "items": { "type": "string" } }
            }),
            &["course", "order"],
        ),
        tool(
            "lessons_list",
            "Lessons of a course in position order.",
            json!({ "course": { "type": "string" } }),
            &["course"],
        ),
        tool(
            "enroll",
            "Enroll in a published course. Idempotent.",
            json!({ "course": { "type": "string" } }),
            &["course"],
        ),
        tool(
            "my_courses",
            "Enrolled courses with completed/total lesson counts.",
            json!({}),
            &[],
        ),
        tool(
            "progress_set",
            "Mark a lesson complete or clear the mark.",
            json!({
                "lesson": { "type": "string" },
                "completed": { "type": "boolean" }
            }),
            &["lesson", "completed"],
        ),
        tool(
            "note_add",
            "Attach a private note to a lesson.",
            json!({
                "lesson": { "type": "string" },
                "body": { "type": "string" }
            }),
            &["lesson", "body"],
        ),
        tool(
            "notes_list",
            "Own notes on a lesson, oldest first.",
            json!({ "lesson": { "type": "string" } }),
            &["lesson"],
        ),
        tool(
            "note_delete",
            "Delete an own note by sequence number.",
            json!({ "seq": { "type": "integer" } }),
            &["seq"],
        ),
        tool(
            "upload_register",
            "Register a media upload and mint its object key (admin).",
            json!({
                "filename": { "type": "string" },
                "content_type": { "type": "string" }
            }),
            &["filename"],
        ),
        tool("users_list", "List accounts, paged (admin).", paging(), &[]),
        tool(
            "audit_list",
            "Audit trail, newest first (admin).",
            paging(),
            &[],
        ),
        tool(
            "notifications",
            "Own notifications, newest first, plus the unread count.",
            json!({ "limit": { "type": "integer" } }),
            &[],
        ),
        tool(
            "notifications_read",
            "Mark all own notifications as read.",
            json!({}),
            &[],
        ),
    ]
}
