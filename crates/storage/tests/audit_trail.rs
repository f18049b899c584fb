#![forbid(unsafe_code)]

use cl_storage::{
    CourseCreateRequest, LessonCreateRequest, LessonUpdateRequest, LessonsReorderRequest,
    SqliteStore,
};
use std::path::PathBuf;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = base.join(format!("cl_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn every_structural_mutation_is_audited() {
    let mut store =
        SqliteStore::open(temp_dir("every_structural_mutation_is_audited")).expect("open store");

    let course = store
        .course_create(CourseCreateRequest {
            title: "Course".to_string(),
            summary: None,
            price_cents: 0,
            actor_user_id: Some("USR-001".to_string()),
        })
        .expect("create course")
        .id;

    let first = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "One".to_string(),
            media_upload_id: None,
            position: None,
            actor_user_id: Some("USR-001".to_string()),
        })
        .expect("append")
        .id;
    let second = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "Two".to_string(),
            media_upload_id: None,
            position: None,
            actor_user_id: Some("USR-001".to_string()),
        })
        .expect("append")
        .id;

    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: second.clone(),
            title: None,
            media_upload_id: None,
            position: Some(1),
            actor_user_id: Some("USR-001".to_string()),
        })
        .expect("move");
    store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course.clone(),
            order: vec![first.clone(), second.clone()],
            actor_user_id: Some("USR-001".to_string()),
        })
        .expect("reorder");
    store
        .lesson_delete(&first, Some("USR-001"))
        .expect("delete");

    let actions = store
        .audit_list(10, 0)
        .expect("audit list")
        .into_iter()
        .map(|row| row.action)
        .collect::<Vec<_>>();
    // Newest first.
    assert_eq!(
        actions,
        vec![
            "lesson_delete",
            "lessons_reorder",
            "lesson_move",
            "lesson_create",
            "lesson_create",
            "course_create",
        ]
    );
}

#[test]
fn audit_rows_carry_actor_and_payload() {
    let mut store =
        SqliteStore::open(temp_dir("audit_rows_carry_actor_and_payload")).expect("open store");

    let course = store
        .course_create(CourseCreateRequest {
            title: "Course".to_string(),
            summary: None,
            price_cents: 0,
            actor_user_id: Some("USR-007".to_string()),
        })
        .expect("create course")
        .id;
    store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "One".to_string(),
            media_upload_id: None,
            position: Some(1),
            actor_user_id: Some("USR-007".to_string()),
        })
        .expect("insert");

    let newest = store.audit_list(1, 0).expect("audit list").remove(0);
    assert_eq!(newest.action, "lesson_create");
    assert_eq!(newest.actor_user_id.as_deref(), Some("USR-007"));
    assert_eq!(newest.entity, "LSN-001");

    let payload: serde_json::Value =
        serde_json::from_str(&newest.payload_json).expect("payload parses");
    assert_eq!(payload["course_id"], course.as_str());
    assert_eq!(payload["position"], 1);
}

#[test]
fn rejected_mutations_leave_no_audit_row() {
    let mut store =
        SqliteStore::open(temp_dir("rejected_mutations_leave_no_audit_row")).expect("open store");

    let course = store
        .course_create(CourseCreateRequest {
            title: "Course".to_string(),
            summary: None,
            price_cents: 0,
            actor_user_id: None,
        })
        .expect("create course")
        .id;
    let before = store.audit_list(10, 0).expect("audit list").len();

    store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course,
            order: vec!["LSN-404".to_string()],
            actor_user_id: None,
        })
        .expect_err("bogus reorder");

    assert_eq!(store.audit_list(10, 0).expect("audit list").len(), before);
}
