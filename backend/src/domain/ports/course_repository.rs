//! Port for whole-document course persistence.
//!
//! Writes replace the entire aggregate. `save` carries the revision the
//! caller loaded so concurrent writers cannot silently overwrite each other.

use async_trait::async_trait;

use crate::domain::course::{Course, CourseId, Projection};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
        /// Stored document could not be encoded or decoded.
        Serialization { message: String } =>
            "course document serialisation failed: {message}",
        /// Stored revision differs from the one the caller loaded.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "course revision mismatch: expected {expected}, found {actual}",
        /// Conditional update targeted a course that no longer exists.
        CourseMissing { course_id: CourseId } =>
            "course {course_id} no longer exists",
    }
}

/// Port for reading and writing course aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find a course by id, shaped by `projection`.
    async fn find_by_id(
        &self,
        course_id: &CourseId,
        projection: Projection,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// List every course, newest first.
    async fn list_all(&self, projection: Projection) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Persist the whole aggregate.
    ///
    /// `expected_revision` of `None` inserts a new course. `Some(n)` replaces
    /// the stored document only while its revision is still `n`.
    async fn save(
        &self,
        course: &Course,
        expected_revision: Option<u32>,
    ) -> Result<(), CourseRepositoryError>;

    /// Delete a course with every nested entity. Returns whether it existed.
    async fn delete_by_id(&self, course_id: &CourseId) -> Result<bool, CourseRepositoryError>;
}

/// Fixture implementation for wiring without a database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn find_by_id(
        &self,
        _course_id: &CourseId,
        _projection: Projection,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self, _projection: Projection) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(
        &self,
        _course: &Course,
        _expected_revision: Option<u32>,
    ) -> Result<(), CourseRepositoryError> {
        Ok(())
    }

    async fn delete_by_id(&self, _course_id: &CourseId) -> Result<bool, CourseRepositoryError> {
        Ok(false)
    }
}
