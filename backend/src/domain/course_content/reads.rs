//! Read paths implementing [`CourseContentQuery`].

use async_trait::async_trait;
use tracing::debug;

use super::{CourseContentService, course_not_found, map_repository_error, require_admin};
use crate::domain::course::{ContentItem, Course, CourseId, Projection};
use crate::domain::ports::{CourseCacheKey, CourseContentQuery};
use crate::domain::{CallerIdentity, Error};

#[async_trait]
impl CourseContentQuery for CourseContentService {
    async fn get_preview(&self, course_id: &CourseId) -> Result<Course, Error> {
        let key = CourseCacheKey::course(course_id);
        if let Some(course) = self.read_cached::<Course>(&key).await {
            debug!(%course_id, "course preview served from cache");
            return Ok(course);
        }

        let course = self
            .repository
            .find_by_id(course_id, Projection::Preview)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| course_not_found(course_id))?;

        self.write_cached(&key, &course, Some(self.config.course_ttl))
            .await;
        Ok(course)
    }

    async fn list_previews(&self) -> Result<Vec<Course>, Error> {
        let key = CourseCacheKey::catalogue();
        if let Some(courses) = self.read_cached::<Vec<Course>>(&key).await {
            debug!(count = courses.len(), "course catalogue served from cache");
            return Ok(courses);
        }

        let courses = self
            .repository
            .list_all(Projection::Preview)
            .await
            .map_err(map_repository_error)?;

        self.write_cached(&key, courses.as_slice(), self.config.catalogue_ttl)
            .await;
        Ok(courses)
    }

    async fn get_content_for_entitled_user(
        &self,
        caller: &CallerIdentity,
        course_id: &CourseId,
    ) -> Result<Vec<ContentItem>, Error> {
        if !caller.is_entitled_to(course_id) {
            return Err(Error::unauthorized(
                "you are not eligible to access this course",
            ));
        }

        let course = self
            .repository
            .find_by_id(course_id, Projection::Full)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| course_not_found(course_id))?;
        Ok(course.into_content())
    }

    async fn list_all_courses(&self, caller: &CallerIdentity) -> Result<Vec<Course>, Error> {
        require_admin(caller)?;
        self.repository
            .list_all(Projection::Full)
            .await
            .map_err(map_repository_error)
    }
}
