#![forbid(unsafe_code)]

use cl_storage::{
    CourseCreateRequest, LessonCreateRequest, LessonUpdateRequest, LessonsReorderRequest,
    SqliteStore, StoreError,
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

fn open_store(test_name: &str) -> SqliteStore {
    SqliteStore::open(temp_dir(test_name)).expect("open store")
}

fn new_course(store: &mut SqliteStore) -> String {
    store
        .course_create(CourseCreateRequest {
            title: "Course".to_string(),
            summary: None,
            price_cents: 4900,
            actor_user_id: None,
        })
        .expect("create course")
        .id
}

fn add_lesson(store: &mut SqliteStore, course_id: &str, title: &str) -> String {
    store
        .lesson_create(LessonCreateRequest {
            course_id: course_id.to_string(),
            title: title.to_string(),
            media_upload_id: None,
            position: None,
            actor_user_id: None,
        })
        .expect("append lesson")
        .id
}

/// (title, position) pairs in course order.
fn ordering(store: &SqliteStore, course_id: &str) -> Vec<(String, i64)> {
    store
        .lessons_list(course_id)
        .expect("list lessons")
        .into_iter()
        .map(|lesson| (lesson.title, lesson.position))
        .collect()
}

fn assert_dense(store: &SqliteStore, course_id: &str) {
    let rows = ordering(store, course_id);
    for (index, (title, position)) in rows.iter().enumerate() {
        assert_eq!(
            *position,
            (index as i64) + 1,
            "expected dense 1..N ordering, found {title} at {position}: {rows:?}"
        );
    }
}

#[test]
fn append_assigns_next_position() {
    let mut store = open_store("append_assigns_next_position");
    let course = new_course(&mut store);

    let first = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "Intro".to_string(),
            media_upload_id: None,
            position: None,
            actor_user_id: None,
        })
        .expect("append to empty course");
    assert_eq!(first.position, 1);

    add_lesson(&mut store, &course, "Two");
    add_lesson(&mut store, &course, "Three");
    let fourth = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "Four".to_string(),
            media_upload_id: None,
            position: None,
            actor_user_id: None,
        })
        .expect("append to populated course");
    assert_eq!(fourth.position, 4);
    assert_dense(&store, &course);
}

#[test]
fn insert_shifts_following_siblings() {
    let mut store = open_store("insert_shifts_following_siblings");
    let course = new_course(&mut store);
    add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");
    add_lesson(&mut store, &course, "C");

    let inserted = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "D".to_string(),
            media_upload_id: None,
            position: Some(2),
            actor_user_id: None,
        })
        .expect("insert at position 2");
    assert_eq!(inserted.position, 2);

    assert_eq!(
        ordering(&store, &course),
        vec![
            ("A".to_string(), 1),
            ("D".to_string(), 2),
            ("B".to_string(), 3),
            ("C".to_string(), 4),
        ]
    );
}

#[test]
fn insert_rejects_non_positive_position() {
    let mut store = open_store("insert_rejects_non_positive_position");
    let course = new_course(&mut store);

    let err = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "Zero".to_string(),
            media_upload_id: None,
            position: Some(0),
            actor_user_id: None,
        })
        .expect_err("position 0 must be rejected");
    assert!(matches!(err, StoreError::InvalidInput(_)));
    assert!(ordering(&store, &course).is_empty());
}

#[test]
fn insert_past_end_keeps_requested_position() {
    // Insert does not clamp; a position past the end is taken literally and
    // leaves a tail gap until the next reorder.
    let mut store = open_store("insert_past_end_keeps_requested_position");
    let course = new_course(&mut store);
    add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");

    let far = store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "Z".to_string(),
            media_upload_id: None,
            position: Some(9),
            actor_user_id: None,
        })
        .expect("insert far past end");
    assert_eq!(far.position, 9);
    assert_eq!(
        ordering(&store, &course),
        vec![
            ("A".to_string(), 1),
            ("B".to_string(), 2),
            ("Z".to_string(), 9),
        ]
    );
}

#[test]
fn move_toward_front_shifts_displaced_range() {
    let mut store = open_store("move_toward_front_shifts_displaced_range");
    let course = new_course(&mut store);
    add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");
    add_lesson(&mut store, &course, "C");
    let d = add_lesson(&mut store, &course, "D");

    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: d,
            title: None,
            media_upload_id: None,
            position: Some(2),
            actor_user_id: None,
        })
        .expect("move D to 2");

    assert_eq!(
        ordering(&store, &course),
        vec![
            ("A".to_string(), 1),
            ("D".to_string(), 2),
            ("B".to_string(), 3),
            ("C".to_string(), 4),
        ]
    );
}

#[test]
fn move_toward_back_shifts_displaced_range() {
    let mut store = open_store("move_toward_back_shifts_displaced_range");
    let course = new_course(&mut store);
    let a = add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");
    add_lesson(&mut store, &course, "C");
    add_lesson(&mut store, &course, "D");

    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: a,
            title: None,
            media_upload_id: None,
            position: Some(3),
            actor_user_id: None,
        })
        .expect("move A to 3");

    assert_eq!(
        ordering(&store, &course),
        vec![
            ("B".to_string(), 1),
            ("C".to_string(), 2),
            ("A".to_string(), 3),
            ("D".to_string(), 4),
        ]
    );
}

#[test]
fn move_clamps_target_past_end() {
    let mut store = open_store("move_clamps_target_past_end");
    let course = new_course(&mut store);
    let a = add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");
    add_lesson(&mut store, &course, "C");

    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: a,
            title: None,
            media_upload_id: None,
            position: Some(99),
            actor_user_id: None,
        })
        .expect("move A far past end");

    assert_eq!(
        ordering(&store, &course),
        vec![
            ("B".to_string(), 1),
            ("C".to_string(), 2),
            ("A".to_string(), 3),
        ]
    );
}

#[test]
fn noop_move_leaves_ordering_untouched() {
    let mut store = open_store("noop_move_leaves_ordering_untouched");
    let course = new_course(&mut store);
    add_lesson(&mut store, &course, "A");
    let b = add_lesson(&mut store, &course, "B");
    add_lesson(&mut store, &course, "C");

    let before = ordering(&store, &course);
    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: b,
            title: Some("B renamed".to_string()),
            media_upload_id: None,
            position: Some(2),
            actor_user_id: None,
        })
        .expect("no-op move with title edit");

    let after = ordering(&store, &course);
    assert_eq!(
        after.iter().map(|(_, p)| *p).collect::<Vec<_>>(),
        before.iter().map(|(_, p)| *p).collect::<Vec<_>>()
    );
    assert_eq!(after[1].0, "B renamed");
}

#[test]
fn delete_compacts_following_siblings() {
    let mut store = open_store("delete_compacts_following_siblings");
    let course = new_course(&mut store);
    add_lesson(&mut store, &course, "A");
    let b = add_lesson(&mut store, &course, "B");
    add_lesson(&mut store, &course, "C");

    store.lesson_delete(&b, None).expect("delete B");

    assert_eq!(
        ordering(&store, &course),
        vec![("A".to_string(), 1), ("C".to_string(), 2)]
    );
}

#[test]
fn delete_unknown_lesson_is_rejected() {
    let mut store = open_store("delete_unknown_lesson_is_rejected");
    let err = store
        .lesson_delete("LSN-999", None)
        .expect_err("unknown lesson");
    assert!(matches!(err, StoreError::UnknownId));
}

#[test]
fn move_unknown_lesson_is_rejected() {
    let mut store = open_store("move_unknown_lesson_is_rejected");
    let err = store
        .lesson_update(LessonUpdateRequest {
            lesson_id: "LSN-999".to_string(),
            title: None,
            media_upload_id: None,
            position: Some(1),
            actor_user_id: None,
        })
        .expect_err("unknown lesson");
    assert!(matches!(err, StoreError::UnknownId));
}

#[test]
fn reorder_applies_full_permutation() {
    let mut store = open_store("reorder_applies_full_permutation");
    let course = new_course(&mut store);
    let a = add_lesson(&mut store, &course, "A");
    let b = add_lesson(&mut store, &course, "B");
    let c = add_lesson(&mut store, &course, "C");

    let rows = store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course.clone(),
            order: vec![c.clone(), a.clone(), b.clone()],
            actor_user_id: None,
        })
        .expect("reorder");

    assert_eq!(
        rows.iter()
            .map(|lesson| (lesson.id.clone(), lesson.position))
            .collect::<Vec<_>>(),
        vec![(c, 1), (a, 2), (b, 3)]
    );
}

#[test]
fn reorder_rejects_size_mismatch_without_partial_change() {
    let mut store = open_store("reorder_rejects_size_mismatch_without_partial_change");
    let course = new_course(&mut store);
    let a = add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");
    let c = add_lesson(&mut store, &course, "C");

    let before = ordering(&store, &course);
    let err = store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course.clone(),
            order: vec![c, a],
            actor_user_id: None,
        })
        .expect_err("short list must be rejected");
    assert!(matches!(
        err,
        StoreError::ReorderMismatch {
            expected: 3,
            actual: 2
        }
    ));
    assert_eq!(ordering(&store, &course), before);
}

#[test]
fn reorder_rejects_foreign_lesson_id() {
    let mut store = open_store("reorder_rejects_foreign_lesson_id");
    let course_one = new_course(&mut store);
    let course_two = new_course(&mut store);
    let a = add_lesson(&mut store, &course_one, "A");
    add_lesson(&mut store, &course_one, "B");
    let foreign = add_lesson(&mut store, &course_two, "X");

    let before = ordering(&store, &course_one);
    let err = store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course_one.clone(),
            order: vec![a, foreign.clone()],
            actor_user_id: None,
        })
        .expect_err("foreign id must be rejected");
    assert!(matches!(err, StoreError::ReorderUnknownId { lesson_id } if lesson_id == foreign));
    assert_eq!(ordering(&store, &course_one), before);
}

#[test]
fn reorder_rejects_duplicate_id() {
    let mut store = open_store("reorder_rejects_duplicate_id");
    let course = new_course(&mut store);
    let a = add_lesson(&mut store, &course, "A");
    add_lesson(&mut store, &course, "B");

    let err = store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course.clone(),
            order: vec![a.clone(), a],
            actor_user_id: None,
        })
        .expect_err("duplicate id must be rejected");
    assert!(matches!(err, StoreError::InvalidInput(_)));
    assert_dense(&store, &course);
}

#[test]
fn operations_never_leak_across_courses() {
    let mut store = open_store("operations_never_leak_across_courses");
    let course_one = new_course(&mut store);
    let course_two = new_course(&mut store);
    add_lesson(&mut store, &course_two, "X");
    add_lesson(&mut store, &course_two, "Y");
    let before = ordering(&store, &course_two);

    let a = add_lesson(&mut store, &course_one, "A");
    add_lesson(&mut store, &course_one, "B");
    store
        .lesson_create(LessonCreateRequest {
            course_id: course_one.clone(),
            title: "C".to_string(),
            media_upload_id: None,
            position: Some(1),
            actor_user_id: None,
        })
        .expect("insert at head");
    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: a.clone(),
            title: None,
            media_upload_id: None,
            position: Some(3),
            actor_user_id: None,
        })
        .expect("move A");
    store.lesson_delete(&a, None).expect("delete A");

    assert_eq!(ordering(&store, &course_two), before);
    assert_dense(&store, &course_one);
}

#[test]
fn ordering_stays_dense_across_mixed_sequence() {
    let mut store = open_store("ordering_stays_dense_across_mixed_sequence");
    let course = new_course(&mut store);

    let a = add_lesson(&mut store, &course, "A");
    assert_dense(&store, &course);
    let b = add_lesson(&mut store, &course, "B");
    assert_dense(&store, &course);

    store
        .lesson_create(LessonCreateRequest {
            course_id: course.clone(),
            title: "C".to_string(),
            media_upload_id: None,
            position: Some(1),
            actor_user_id: None,
        })
        .expect("insert at head");
    assert_dense(&store, &course);

    store
        .lesson_update(LessonUpdateRequest {
            lesson_id: b.clone(),
            title: None,
            media_upload_id: None,
            position: Some(1),
            actor_user_id: None,
        })
        .expect("move B to head");
    assert_dense(&store, &course);

    store.lesson_delete(&a, None).expect("delete A");
    assert_dense(&store, &course);

    let remaining = store
        .lessons_list(&course)
        .expect("list")
        .into_iter()
        .map(|lesson| lesson.id)
        .collect::<Vec<_>>();
    let reversed = remaining.iter().rev().cloned().collect::<Vec<_>>();
    store
        .lessons_reorder(LessonsReorderRequest {
            course_id: course.clone(),
            order: reversed,
            actor_user_id: None,
        })
        .expect("reverse order");
    assert_dense(&store, &course);
}
