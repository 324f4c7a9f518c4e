//! Tests for nested lookups, mutation and projections on the aggregate.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{ErrorCode, UserId};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn author(name: &str) -> Author {
    Author {
        id: UserId::random(),
        name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

fn details() -> CourseDetails {
    CourseDetails {
        name: "Rust for Backends".to_owned(),
        description: "Services with actix and diesel".to_owned(),
        price: 49.0,
        estimated_price: Some(79.0),
        thumbnail: None,
        tags: "rust,backend".to_owned(),
        level: "Intermediate".to_owned(),
        demo_url: "https://videos.example.com/demo".to_owned(),
    }
}

fn lesson(title: &str) -> ContentItemDraft {
    ContentItemDraft {
        title: title.to_owned(),
        description: "lesson".to_owned(),
        video_url: Some("https://videos.example.com/1".to_owned()),
        video_section: "Basics".to_owned(),
        video_length: 12,
        links: vec![ContentLink {
            title: "Docs".to_owned(),
            url: "https://docs.rs".to_owned(),
        }],
        suggestion: Some("Read chapter 1".to_owned()),
    }
}

#[fixture]
fn course() -> Course {
    Course::publish(
        CourseDraft {
            details: details(),
            content: vec![lesson("Ownership"), lesson("Borrowing")],
        },
        now(),
    )
    .expect("valid course")
}

#[rstest]
fn publish_assigns_fresh_ids_at_revision_one(course: Course) {
    assert_eq!(course.revision(), 1);
    assert_eq!(course.content().len(), 2);
    assert_ne!(course.content()[0].id, course.content()[1].id);
    assert_eq!(course.ratings(), 0.0);
    assert!(course.reviews().is_empty());
}

#[rstest]
#[case("", "name")]
#[case("   ", "name")]
fn publish_rejects_blank_names(#[case] name: &str, #[case] field: &'static str) {
    let mut draft_details = details();
    draft_details.name = name.to_owned();
    let err = Course::publish(
        CourseDraft {
            details: draft_details,
            content: Vec::new(),
        },
        now(),
    )
    .expect_err("blank name rejected");
    assert_eq!(err, CourseError::EmptyField { field });
}

#[rstest]
fn add_question_appends_to_target_item_only(mut course: Course) {
    let target = course.content()[1].id;
    let (question_id, title) = course
        .add_question(&target, author("Ada"), "Why?".to_owned(), now())
        .expect("question added");

    assert_eq!(title, "Borrowing");
    assert!(course.content()[0].questions.is_empty());
    let questions = &course.content()[1].questions;
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].id, question_id);
    assert!(questions[0].replies.is_empty());
}

#[rstest]
fn add_question_rejects_unknown_content(mut course: Course) {
    let snapshot = course.clone();
    let err = course
        .add_question(&ContentId::random(), author("Ada"), "Why?".to_owned(), now())
        .expect_err("unknown content rejected");
    assert!(matches!(err, CourseError::ContentNotFound { .. }));
    assert_eq!(Error::from(err).code(), ErrorCode::InvalidReference);
    assert_eq!(course, snapshot);
}

#[rstest]
fn add_answer_returns_asker(mut course: Course) {
    let content_id = course.content()[0].id;
    let asker = author("Ada");
    let (question_id, _) = course
        .add_question(&content_id, asker.clone(), "Why?".to_owned(), now())
        .expect("question added");

    let receipt = course
        .add_answer(
            &content_id,
            &question_id,
            author("Grace"),
            "Because.".to_owned(),
            now(),
        )
        .expect("answer added");

    assert_eq!(receipt.asker, asker);
    assert_eq!(receipt.content_title, "Ownership");
    assert_eq!(course.content()[0].questions[0].replies.len(), 1);
}

#[rstest]
fn add_answer_rejects_unknown_question(mut course: Course) {
    let content_id = course.content()[0].id;
    let err = course
        .add_answer(
            &content_id,
            &QuestionId::random(),
            author("Grace"),
            "Because.".to_owned(),
            now(),
        )
        .expect_err("unknown question rejected");
    assert!(matches!(err, CourseError::QuestionNotFound { .. }));
    assert_eq!(Error::from(err).code(), ErrorCode::InvalidReference);
}

#[rstest]
#[case(&[5], 5.0)]
#[case(&[4, 2], 3.0)]
#[case(&[5, 4, 4], 13.0 / 3.0)]
fn add_review_recomputes_mean(mut course: Course, #[case] ratings: &[u8], #[case] expected: f64) {
    for value in ratings {
        let rating = Rating::new(*value).expect("valid rating");
        course
            .add_review(author("Ada"), rating, "Great".to_owned(), now())
            .expect("review added");
    }
    assert!((course.ratings() - expected).abs() < f64::EPSILON);
    assert!(course.reviews().iter().all(|review| review.replies.is_none()));
}

#[rstest]
#[case(0)]
#[case(6)]
fn rating_rejects_out_of_range(#[case] value: u8) {
    let err = Rating::new(value).expect_err("out of range");
    assert_eq!(Error::from(err).code(), ErrorCode::InvalidRequest);
}

#[rstest]
fn add_review_reply_initialises_thread(mut course: Course) {
    let review_id = course
        .add_review(
            author("Ada"),
            Rating::new(4).expect("valid rating"),
            "Nice".to_owned(),
            now(),
        )
        .expect("review added");

    course
        .add_review_reply(&review_id, author("Admin"), "Thanks".to_owned(), now())
        .expect("reply added");
    course
        .add_review_reply(&review_id, author("Admin"), "Again".to_owned(), now())
        .expect("reply added");

    let replies = course
        .review(&review_id)
        .and_then(|review| review.replies.as_ref())
        .expect("thread initialised");
    assert_eq!(replies.len(), 2);
}

#[rstest]
fn add_review_reply_rejects_unknown_review(mut course: Course) {
    let err = course
        .add_review_reply(&ReviewId::random(), author("Admin"), "Hi".to_owned(), now())
        .expect_err("unknown review rejected");
    assert_eq!(Error::from(err).code(), ErrorCode::NotFound);
}

#[rstest]
fn preview_strips_gated_material(mut course: Course) {
    let content_id = course.content()[0].id;
    course
        .add_question(&content_id, author("Ada"), "Why?".to_owned(), now())
        .expect("question added");
    let review_id = course
        .add_review(
            author("Ada"),
            Rating::new(5).expect("valid rating"),
            "Great".to_owned(),
            now(),
        )
        .expect("review added");
    course
        .add_review_reply(&review_id, author("Admin"), "Thanks".to_owned(), now())
        .expect("reply added");

    let preview = course.project(Projection::Preview);

    for item in preview.content() {
        assert!(item.video_url.is_none());
        assert!(item.suggestion.is_none());
        assert!(item.links.is_empty());
        assert!(item.questions.is_empty());
        assert!(!item.title.is_empty());
    }
    assert!(preview.reviews()[0].replies.is_none());
    assert!(preview.reviews()[0].author.email.is_empty());
    assert_eq!(preview.reviews()[0].author.name, "Ada");
}

#[rstest]
fn preview_json_omits_reviewer_email(mut course: Course) {
    course
        .add_review(
            author("Ada"),
            Rating::new(4).expect("valid rating"),
            "Clear".to_owned(),
            now(),
        )
        .expect("review added");

    let full = serde_json::to_value(&course).expect("encode full");
    assert!(full["reviews"][0]["author"].get("email").is_some());

    let preview = serde_json::to_value(course.into_preview()).expect("encode preview");
    assert!(preview["reviews"][0]["author"].get("email").is_none());
    let decoded: Course = serde_json::from_value(preview).expect("preview decodes");
    assert!(decoded.reviews()[0].author.email.is_empty());
}

#[rstest]
fn touch_advances_revision(mut course: Course) {
    let later = now() + chrono::Duration::minutes(5);
    course.touch(later);
    assert_eq!(course.revision(), 2);
    assert_eq!(course.updated_at(), later);
}

#[rstest]
fn apply_details_keeps_nested_entities(mut course: Course) {
    let content = course.content().to_vec();
    let mut updated = details();
    updated.name = "Advanced Rust".to_owned();
    course.apply_details(updated).expect("details applied");
    assert_eq!(course.name(), "Advanced Rust");
    assert_eq!(course.content(), content.as_slice());
}

#[rstest]
fn document_uses_wire_field_names(mut course: Course) {
    let review_id = course
        .add_review(
            author("Ada"),
            Rating::new(5).expect("valid rating"),
            "Great".to_owned(),
            now(),
        )
        .expect("review added");
    course
        .add_review_reply(&review_id, author("Admin"), "Thanks".to_owned(), now())
        .expect("reply added");

    let value = serde_json::to_value(&course).expect("serialise course");
    assert!(value.get("courseData").is_some());
    assert!(value["reviews"][0].get("commentReplies").is_some());
    assert_eq!(value["reviews"][0]["rating"], 5);

    let back: Course = serde_json::from_value(value).expect("deserialise course");
    assert_eq!(back, course);
}
