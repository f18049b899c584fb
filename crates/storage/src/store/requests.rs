#![forbid(unsafe_code)]

use cl_core::ids::Email;
use cl_core::model::Role;

#[derive(Clone, Debug)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct SessionRow {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    pub expires_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct CourseRow {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub price_cents: i64,
    pub published: bool,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct LessonRow {
    pub id: String,
    pub course_id: String,
    pub position: i64,
    pub title: String,
    pub media_upload_id: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct EnrollmentRow {
    pub course_id: String,
    pub course_title: String,
    pub enrolled_at_ms: i64,
    pub completed_lessons: i64,
    pub total_lessons: i64,
}

#[derive(Clone, Debug)]
pub struct NoteRow {
    pub seq: i64,
    pub lesson_id: String,
    pub body: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct UploadRow {
    pub id: String,
    pub owner_user_id: String,
    pub filename: String,
    pub content_type: String,
    pub object_key: String,
    pub status: String,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug)]
pub struct AuditRow {
    pub seq: i64,
    pub ts_ms: i64,
    pub actor_user_id: Option<String>,
    pub action: String,
    pub entity: String,
    pub summary: String,
    pub payload_json: String,
}

#[derive(Clone, Debug)]
pub struct NotificationRow {
    pub seq: i64,
    pub kind: String,
    pub body: String,
    pub created_at_ms: i64,
    pub read: bool,
}

#[derive(Debug)]
pub struct UserCreateRequest {
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug)]
pub struct SessionCreateRequest {
    pub token: String,
    pub user_id: String,
    pub ttl_ms: i64,
}

#[derive(Debug)]
pub struct CourseCreateRequest {
    pub title: String,
    pub summary: Option<String>,
    pub price_cents: i64,
    pub actor_user_id: Option<String>,
}

#[derive(Debug)]
pub struct CourseEditRequest {
    pub course_id: String,
    pub title: Option<String>,
    pub summary: Option<Option<String>>,
    pub price_cents: Option<i64>,
    pub actor_user_id: Option<String>,
}

#[derive(Debug)]
pub struct LessonCreateRequest {
    pub course_id: String,
    pub title: String,
    pub media_upload_id: Option<String>,
    /// 1-based insert position. Absent means append at the end. Values past
    /// the end are taken as-is, not clamped; see lessons_reorder for repair.
    pub position: Option<i64>,
    pub actor_user_id: Option<String>,
}

#[derive(Debug)]
pub struct LessonUpdateRequest {
    pub lesson_id: String,
    pub title: Option<String>,
    pub media_upload_id: Option<Option<String>>,
    /// 1-based target position, clamped into [1, N].
    pub position: Option<i64>,
    pub actor_user_id: Option<String>,
}

#[derive(Debug)]
pub struct LessonsReorderRequest {
    pub course_id: String,
    /// Complete new ordering; must be a bijection onto current membership.
    pub order: Vec<String>,
    pub actor_user_id: Option<String>,
}

#[derive(Debug)]
pub struct NoteAddRequest {
    pub user_id: String,
    pub lesson_id: String,
    pub body: String,
}

#[derive(Debug)]
pub struct UploadRegisterRequest {
    pub owner_user_id: String,
    pub filename: String,
    pub content_type: String,
}
