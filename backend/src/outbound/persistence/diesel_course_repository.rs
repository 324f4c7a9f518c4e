//! PostgreSQL-backed `CourseRepository` using Diesel.
//!
//! Each course is one row holding the whole aggregate as a JSONB document.
//! Conditional updates filter on the stored revision so a stale writer
//! changes zero rows and receives `RevisionMismatch`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::course::{Course, CourseId, Projection};
use crate::domain::ports::{CourseRepository, CourseRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CourseDocumentUpdate, CourseRow, NewCourseRow};
use super::pool::{DbPool, PoolError};
use super::schema::courses;

/// Diesel-backed implementation of the `CourseRepository` port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CourseRepositoryError {
    map_pool_error(error, |message| CourseRepositoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        |message| CourseRepositoryError::query(message),
        |message| CourseRepositoryError::connection(message),
    )
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "revisions stay far below i32::MAX"
)]
fn revision_to_db(revision: u32) -> i32 {
    revision as i32
}

#[expect(
    clippy::cast_sign_loss,
    reason = "revision column is constrained to be positive"
)]
fn revision_from_db(revision: i32) -> u32 {
    revision as u32
}

/// Decode a row, taking the revision from the column rather than the
/// document.
fn row_to_course(row: CourseRow, projection: Projection) -> Result<Course, CourseRepositoryError> {
    let course: Course = serde_json::from_value(row.document).map_err(|err| {
        CourseRepositoryError::serialization(format!("course {}: {err}", row.id))
    })?;
    Ok(course
        .with_revision(revision_from_db(row.revision))
        .project(projection))
}

fn course_document(course: &Course) -> Result<serde_json::Value, CourseRepositoryError> {
    serde_json::to_value(course)
        .map_err(|err| CourseRepositoryError::serialization(err.to_string()))
}

/// Explain why a conditional update touched no rows.
async fn classify_stale_update<C>(
    conn: &mut C,
    course_id: CourseId,
    expected_revision: u32,
) -> CourseRepositoryError
where
    C: diesel_async::AsyncConnection<Backend = diesel::pg::Pg> + Send,
{
    let current = courses::table
        .filter(courses::id.eq(course_id.as_uuid()))
        .select(courses::revision)
        .first::<i32>(conn)
        .await
        .optional();

    match current {
        Ok(Some(actual)) => {
            CourseRepositoryError::revision_mismatch(expected_revision, revision_from_db(actual))
        }
        Ok(None) => CourseRepositoryError::course_missing(course_id),
        Err(error) => diesel_error(error),
    }
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn find_by_id(
        &self,
        course_id: &CourseId,
        projection: Projection,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<CourseRow> = courses::table
            .filter(courses::id.eq(course_id.as_uuid()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(|row| row_to_course(row, projection)).transpose()
    }

    async fn list_all(&self, projection: Projection) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CourseRow> = courses::table
            .order(courses::created_at.desc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_course(row, projection))
            .collect()
    }

    async fn save(
        &self,
        course: &Course,
        expected_revision: Option<u32>,
    ) -> Result<(), CourseRepositoryError> {
        let document = course_document(course)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        match expected_revision {
            None => {
                let row = NewCourseRow {
                    id: *course.id().as_uuid(),
                    revision: revision_to_db(course.revision()),
                    document,
                    created_at: course.created_at(),
                    updated_at: course.updated_at(),
                };
                diesel::insert_into(courses::table)
                    .values(&row)
                    .execute(&mut conn)
                    .await
                    .map(|_| ())
                    .map_err(diesel_error)
            }
            Some(expected) => {
                let update = CourseDocumentUpdate {
                    revision: revision_to_db(course.revision()),
                    document,
                    updated_at: course.updated_at(),
                };
                let updated_rows = diesel::update(courses::table)
                    .filter(
                        courses::id
                            .eq(course.id().as_uuid())
                            .and(courses::revision.eq(revision_to_db(expected))),
                    )
                    .set(&update)
                    .execute(&mut conn)
                    .await
                    .map_err(diesel_error)?;

                if updated_rows == 0 {
                    return Err(classify_stale_update(&mut conn, course.id(), expected).await);
                }
                Ok(())
            }
        }
    }

    async fn delete_by_id(&self, course_id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target: &Uuid = course_id.as_uuid();

        let deleted = diesel::delete(courses::table.filter(courses::id.eq(target)))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }
}
