//! Mutation paths implementing [`CourseContentCommand`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{CourseContentService, course_not_found, map_repository_error, require_admin};
use crate::domain::Error;
use crate::domain::course::{Course, CourseId, Projection, Rating};
use crate::domain::ports::{
    AddAnswerRequest, AddQuestionRequest, AddReviewReplyRequest, AddReviewRequest,
    CourseCacheKey, CourseContentCommand, CourseRepositoryError, DeleteCourseRequest,
    EditCourseRequest, PublishCourseRequest,
};

impl CourseContentService {
    /// Load, modify and save a course under a revision check.
    ///
    /// `apply` may run more than once: when another writer saved in between,
    /// the aggregate is reloaded and `apply` runs again on the fresh copy.
    async fn mutate_course<T, F>(&self, course_id: &CourseId, mut apply: F) -> Result<(Course, T), Error>
    where
        T: Send,
        F: FnMut(&mut Course, DateTime<Utc>) -> Result<T, Error> + Send,
    {
        let max_attempts = self.config.max_save_attempts.max(1);
        let mut attempt = 1;
        loop {
            let mut course = self
                .repository
                .find_by_id(course_id, Projection::Full)
                .await
                .map_err(map_repository_error)?
                .ok_or_else(|| course_not_found(course_id))?;
            let loaded_revision = course.revision();
            let now = self.clock.utc();
            let outcome = apply(&mut course, now)?;
            course.touch(now);

            match self.repository.save(&course, Some(loaded_revision)).await {
                Ok(()) => return Ok((course, outcome)),
                Err(CourseRepositoryError::RevisionMismatch { expected, actual })
                    if attempt < max_attempts =>
                {
                    debug!(%course_id, attempt, expected, actual, "course changed underneath; retrying");
                    attempt += 1;
                }
                Err(error) => return Err(map_repository_error(error)),
            }
        }
    }
}

#[async_trait]
impl CourseContentCommand for CourseContentService {
    async fn add_question(&self, request: AddQuestionRequest) -> Result<Course, Error> {
        let author = request.caller.as_author();
        let (course, content_title) = self
            .mutate_course(&request.course_id, |course, now| {
                let (_, title) = course.add_question(
                    &request.content_id,
                    author.clone(),
                    request.question.clone(),
                    now,
                )?;
                Ok(title)
            })
            .await?;

        info!(course_id = %request.course_id, content_id = %request.content_id, "question added");
        self.announce_question(&content_title).await;
        Ok(course)
    }

    async fn add_answer(&self, request: AddAnswerRequest) -> Result<Course, Error> {
        let author = request.caller.as_author();
        let (course, receipt) = self
            .mutate_course(&request.course_id, |course, now| {
                Ok(course.add_answer(
                    &request.content_id,
                    &request.question_id,
                    author.clone(),
                    request.answer.clone(),
                    now,
                )?)
            })
            .await?;

        info!(
            course_id = %request.course_id,
            question_id = %request.question_id,
            "answer added"
        );
        self.announce_answer(&request.course_id, &request.caller, receipt)
            .await?;
        Ok(course)
    }

    async fn add_review(&self, request: AddReviewRequest) -> Result<Course, Error> {
        if !request.caller.is_entitled_to(&request.course_id) {
            return Err(Error::unauthorized(
                "you are not eligible to access this course",
            ));
        }
        let rating = Rating::new(request.rating)?;
        let author = request.caller.as_author();
        let (course, review_id) = self
            .mutate_course(&request.course_id, |course, now| {
                Ok(course.add_review(author.clone(), rating, request.comment.clone(), now)?)
            })
            .await?;

        info!(course_id = %request.course_id, %review_id, ratings = course.ratings(), "review added");
        // Ratings and reviews are part of both preview snapshots.
        self.invalidate(&[
            CourseCacheKey::course(&request.course_id),
            CourseCacheKey::catalogue(),
        ])
        .await;
        self.describe_review(&request.caller, &course);
        Ok(course)
    }

    async fn add_review_reply(&self, request: AddReviewReplyRequest) -> Result<Course, Error> {
        let author = request.caller.as_author();
        let (course, ()) = self
            .mutate_course(&request.course_id, |course, now| {
                Ok(course.add_review_reply(
                    &request.review_id,
                    author.clone(),
                    request.comment.clone(),
                    now,
                )?)
            })
            .await?;

        info!(course_id = %request.course_id, review_id = %request.review_id, "review reply added");
        Ok(course)
    }

    async fn publish_course(&self, request: PublishCourseRequest) -> Result<Course, Error> {
        require_admin(&request.caller)?;
        let course = Course::publish(request.draft, self.clock.utc())?;
        self.repository
            .save(&course, None)
            .await
            .map_err(map_repository_error)?;

        info!(course_id = %course.id(), "course published");
        self.invalidate(&[CourseCacheKey::catalogue()]).await;
        Ok(course)
    }

    async fn edit_course(&self, request: EditCourseRequest) -> Result<Course, Error> {
        require_admin(&request.caller)?;
        let (course, ()) = self
            .mutate_course(&request.course_id, |course, _now| {
                Ok(course.apply_details(request.details.clone())?)
            })
            .await?;

        info!(course_id = %request.course_id, "course edited");
        self.invalidate(&[
            CourseCacheKey::course(&request.course_id),
            CourseCacheKey::catalogue(),
        ])
        .await;
        Ok(course)
    }

    async fn delete_course(&self, request: DeleteCourseRequest) -> Result<(), Error> {
        require_admin(&request.caller)?;
        let deleted = self
            .repository
            .delete_by_id(&request.course_id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(course_not_found(&request.course_id));
        }

        info!(course_id = %request.course_id, "course deleted");
        self.invalidate(&[
            CourseCacheKey::course(&request.course_id),
            CourseCacheKey::catalogue(),
        ])
        .await;
        Ok(())
    }
}
