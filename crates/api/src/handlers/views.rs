#![forbid(unsafe_code)]

use crate::support::ts_ms_to_rfc3339;
use cl_storage::{
    AuditRow, CourseRow, EnrollmentRow, LessonRow, NoteRow, NotificationRow, UploadRow, UserRow,
};
use serde_json::{Value, json};

// Opaque base for the out-of-band byte transfer; the store only tracks keys.
const MEDIA_BASE_URL: &str = "https://media.courselab.invalid";

pub(crate) fn user_json(user: &UserRow) -> Value {
    json!({
        "id": user.id,
        "email": user.email,
        "role": user.role.as_str(),
        "created_at": ts_ms_to_rfc3339(user.created_at_ms),
    })
}

pub(crate) fn course_json(course: &CourseRow) -> Value {
    json!({
        "id": course.id,
        "title": course.title,
        "summary": course.summary,
        "price_cents": course.price_cents,
        "published": course.published,
        "created_at": ts_ms_to_rfc3339(course.created_at_ms),
        "updated_at": ts_ms_to_rfc3339(course.updated_at_ms),
    })
}

pub(crate) fn lesson_json(lesson: &LessonRow) -> Value {
    json!({
        "id": lesson.id,
        "course_id": lesson.course_id,
        "position": lesson.position,
        "title": lesson.title,
        "media_upload_id": lesson.media_upload_id,
        "created_at": ts_ms_to_rfc3339(lesson.created_at_ms),
        "updated_at": ts_ms_to_rfc3339(lesson.updated_at_ms),
    })
}

pub(crate) fn enrollment_json(enrollment: &EnrollmentRow) -> Value {
    json!({
        "course_id": enrollment.course_id,
        "course_title": enrollment.course_title,
        "enrolled_at": ts_ms_to_rfc3339(enrollment.enrolled_at_ms),
        "completed_lessons": enrollment.completed_lessons,
        "total_lessons": enrollment.total_lessons,
    })
}

pub(crate) fn note_json(note: &NoteRow) -> Value {
    json!({
        "seq": note.seq,
        "lesson_id": note.lesson_id,
        "body": note.body,
        "created_at": ts_ms_to_rfc3339(note.created_at_ms),
    })
}

pub(crate) fn upload_json(upload: &UploadRow) -> Value {
    json!({
        "id": upload.id,
        "filename": upload.filename,
        "content_type": upload.content_type,
        "object_key": upload.object_key,
        "put_url": format!("{MEDIA_BASE_URL}/{}", upload.object_key),
        "status": upload.status,
        "created_at": ts_ms_to_rfc3339(upload.created_at_ms),
    })
}

pub(crate) fn audit_json(row: &AuditRow) -> Value {
    let payload: Value = serde_json::from_str(&row.payload_json)
        .unwrap_or_else(|_| Value::String(row.payload_json.clone()));
    json!({
        "seq": row.seq,
        "ts": ts_ms_to_rfc3339(row.ts_ms),
        "actor_user_id": row.actor_user_id,
        "action": row.action,
        "entity": row.entity,
        "summary": row.summary,
        "payload": payload,
    })
}

pub(crate) fn notification_json(row: &NotificationRow) -> Value {
    json!({
        "seq": row.seq,
        "kind": row.kind,
        "body": row.body,
        "created_at": ts_ms_to_rfc3339(row.created_at_ms),
        "read": row.read,
    })
}
