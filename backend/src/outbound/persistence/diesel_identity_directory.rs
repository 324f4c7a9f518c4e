//! PostgreSQL-backed `IdentityDirectory` reading `users` and `user_courses`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::course::CourseId;
use crate::domain::ports::{IdentityDirectory, IdentityDirectoryError};
use crate::domain::{CallerIdentity, Role, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::{user_courses, users};

/// Diesel-backed identity lookup.
#[derive(Clone)]
pub struct DieselIdentityDirectory {
    pool: DbPool,
}

impl DieselIdentityDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> IdentityDirectoryError {
    map_pool_error(error, |message| IdentityDirectoryError::connection(message))
}

fn diesel_error(error: diesel::result::Error) -> IdentityDirectoryError {
    map_diesel_error(
        error,
        |message| IdentityDirectoryError::query(message),
        |message| IdentityDirectoryError::connection(message),
    )
}

fn row_to_identity(row: UserRow, course_ids: Vec<Uuid>) -> CallerIdentity {
    CallerIdentity {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: row.email,
        role: Role::from_stored(row.role.as_str()),
        entitlements: course_ids.into_iter().map(CourseId::from_uuid).collect(),
    }
}

#[async_trait]
impl IdentityDirectory for DieselIdentityDirectory {
    async fn find_identity(
        &self,
        user_id: &UserId,
    ) -> Result<Option<CallerIdentity>, IdentityDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let Some(row) = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
        else {
            return Ok(None);
        };

        let course_ids: Vec<Uuid> = user_courses::table
            .filter(user_courses::user_id.eq(user_id.as_uuid()))
            .select(user_courses::course_id)
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(Some(row_to_identity(row, course_ids)))
    }
}
