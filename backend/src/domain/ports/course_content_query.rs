//! Driving port for course reads.
//!
//! Inbound adapters use this port to fetch previews and gated lesson content
//! without knowing about the cache or the store.

use async_trait::async_trait;

use crate::domain::course::{ContentItem, Course, CourseId};
use crate::domain::{CallerIdentity, Error};

/// Domain use-case port for reading courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseContentQuery: Send + Sync {
    /// Preview of one course, served through the cache.
    async fn get_preview(&self, course_id: &CourseId) -> Result<Course, Error>;

    /// Previews of every course, served through the cache.
    async fn list_previews(&self) -> Result<Vec<Course>, Error>;

    /// Full lesson sequence for a caller entitled to the course.
    async fn get_content_for_entitled_user(
        &self,
        caller: &CallerIdentity,
        course_id: &CourseId,
    ) -> Result<Vec<ContentItem>, Error>;

    /// Every course in full, newest first. Administrators only.
    async fn list_all_courses(&self, caller: &CallerIdentity) -> Result<Vec<Course>, Error>;
}

/// Fixture query with an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseContentQuery;

#[async_trait]
impl CourseContentQuery for FixtureCourseContentQuery {
    async fn get_preview(&self, course_id: &CourseId) -> Result<Course, Error> {
        Err(Error::not_found(format!("course {course_id} not found")))
    }

    async fn list_previews(&self) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }

    async fn get_content_for_entitled_user(
        &self,
        _caller: &CallerIdentity,
        course_id: &CourseId,
    ) -> Result<Vec<ContentItem>, Error> {
        Err(Error::not_found(format!("course {course_id} not found")))
    }

    async fn list_all_courses(&self, _caller: &CallerIdentity) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_preview_is_not_found() {
        let err = FixtureCourseContentQuery
            .get_preview(&CourseId::random())
            .await
            .expect_err("fixture has no courses");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
