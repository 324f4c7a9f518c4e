//! Driving port for course mutations.
//!
//! Every mutation loads the whole aggregate, edits it and saves it back under
//! a revision check. Mutations return the updated course.

use async_trait::async_trait;

use crate::domain::course::{
    ContentId, Course, CourseDetails, CourseDraft, CourseId, QuestionId, ReviewId,
};
use crate::domain::{CallerIdentity, Error};

/// Ask a question on a content item.
#[derive(Debug, Clone, PartialEq)]
pub struct AddQuestionRequest {
    pub caller: CallerIdentity,
    pub course_id: CourseId,
    pub content_id: ContentId,
    pub question: String,
}

/// Answer a question on a content item.
#[derive(Debug, Clone, PartialEq)]
pub struct AddAnswerRequest {
    pub caller: CallerIdentity,
    pub course_id: CourseId,
    pub content_id: ContentId,
    pub question_id: QuestionId,
    pub answer: String,
}

/// Review a course the caller is entitled to.
///
/// `rating` is validated by the service so out-of-range values surface as
/// `invalid_request` rather than a deserialisation failure.
#[derive(Debug, Clone, PartialEq)]
pub struct AddReviewRequest {
    pub caller: CallerIdentity,
    pub course_id: CourseId,
    pub rating: u8,
    pub comment: String,
}

/// Reply beneath an existing review.
#[derive(Debug, Clone, PartialEq)]
pub struct AddReviewReplyRequest {
    pub caller: CallerIdentity,
    pub course_id: CourseId,
    pub review_id: ReviewId,
    pub comment: String,
}

/// Create a new course.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishCourseRequest {
    pub caller: CallerIdentity,
    pub draft: CourseDraft,
}

/// Replace the catalogue fields of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCourseRequest {
    pub caller: CallerIdentity,
    pub course_id: CourseId,
    pub details: CourseDetails,
}

/// Remove a course with all nested entities.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCourseRequest {
    pub caller: CallerIdentity,
    pub course_id: CourseId,
}

/// Domain use-case port for course mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseContentCommand: Send + Sync {
    async fn add_question(&self, request: AddQuestionRequest) -> Result<Course, Error>;

    async fn add_answer(&self, request: AddAnswerRequest) -> Result<Course, Error>;

    async fn add_review(&self, request: AddReviewRequest) -> Result<Course, Error>;

    async fn add_review_reply(&self, request: AddReviewReplyRequest) -> Result<Course, Error>;

    async fn publish_course(&self, request: PublishCourseRequest) -> Result<Course, Error>;

    async fn edit_course(&self, request: EditCourseRequest) -> Result<Course, Error>;

    async fn delete_course(&self, request: DeleteCourseRequest) -> Result<(), Error>;
}

/// Fixture command that rejects every mutation as unavailable.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseContentCommand;

fn unavailable() -> Error {
    Error::upstream_failure("course store is not configured")
}

#[async_trait]
impl CourseContentCommand for FixtureCourseContentCommand {
    async fn add_question(&self, _request: AddQuestionRequest) -> Result<Course, Error> {
        Err(unavailable())
    }

    async fn add_answer(&self, _request: AddAnswerRequest) -> Result<Course, Error> {
        Err(unavailable())
    }

    async fn add_review(&self, _request: AddReviewRequest) -> Result<Course, Error> {
        Err(unavailable())
    }

    async fn add_review_reply(&self, _request: AddReviewReplyRequest) -> Result<Course, Error> {
        Err(unavailable())
    }

    async fn publish_course(&self, _request: PublishCourseRequest) -> Result<Course, Error> {
        Err(unavailable())
    }

    async fn edit_course(&self, _request: EditCourseRequest) -> Result<Course, Error> {
        Err(unavailable())
    }

    async fn delete_course(&self, _request: DeleteCourseRequest) -> Result<(), Error> {
        Err(unavailable())
    }
}
