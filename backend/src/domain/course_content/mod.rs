//! Course content service: read-through caching over the course store and
//! nested-entity mutations with notification side effects.
//!
//! Reads consult the cache first and repopulate it on a miss. Mutations
//! load the whole aggregate, edit it, and save it back guarded by the
//! revision that was loaded; a concurrent write triggers a bounded retry of
//! the whole load-modify-save cycle.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use serde_json::json;

use crate::domain::course::CourseId;
use crate::domain::ports::{
    CourseCache, CourseRepository, CourseRepositoryError, MailSink, NotificationSink,
};
use crate::domain::{CallerIdentity, Error};

mod cache;
mod mutations;
mod reads;
mod side_effects;


/// Expiry applied to single-course preview snapshots (seven days).
pub const DEFAULT_COURSE_TTL: Duration = Duration::from_secs(604_800);
/// Load-modify-save attempts before a mutation reports a conflict.
pub const DEFAULT_MAX_SAVE_ATTEMPTS: u32 = 3;

/// Tunables for caching and retry behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseContentConfig {
    /// Expiry of the per-course preview key.
    pub course_ttl: Duration,
    /// Expiry of the catalogue key. `None` keeps it until invalidated.
    pub catalogue_ttl: Option<Duration>,
    /// Attempts per mutation, including the first one.
    pub max_save_attempts: u32,
}

impl Default for CourseContentConfig {
    fn default() -> Self {
        Self {
            course_ttl: DEFAULT_COURSE_TTL,
            catalogue_ttl: None,
            max_save_attempts: DEFAULT_MAX_SAVE_ATTEMPTS,
        }
    }
}

/// Driven ports consumed by [`CourseContentService`].
#[derive(Clone)]
pub struct CourseContentPorts {
    pub repository: Arc<dyn CourseRepository>,
    pub cache: Arc<dyn CourseCache>,
    pub notifications: Arc<dyn NotificationSink>,
    pub mail: Arc<dyn MailSink>,
}

/// Implements [`crate::domain::ports::CourseContentQuery`] and
/// [`crate::domain::ports::CourseContentCommand`].
#[derive(Clone)]
pub struct CourseContentService {
    repository: Arc<dyn CourseRepository>,
    cache: Arc<dyn CourseCache>,
    notifications: Arc<dyn NotificationSink>,
    mail: Arc<dyn MailSink>,
    clock: Arc<dyn Clock>,
    config: CourseContentConfig,
}

impl CourseContentService {
    /// Build the service from its ports.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use course_backend::domain::ports::{
    ///     FixtureCourseCache, FixtureCourseRepository, FixtureMailSink, FixtureNotificationSink,
    /// };
    /// use course_backend::domain::{CourseContentConfig, CourseContentPorts, CourseContentService};
    /// use mockable::DefaultClock;
    ///
    /// let _service = CourseContentService::new(
    ///     CourseContentPorts {
    ///         repository: Arc::new(FixtureCourseRepository),
    ///         cache: Arc::new(FixtureCourseCache),
    ///         notifications: Arc::new(FixtureNotificationSink),
    ///         mail: Arc::new(FixtureMailSink),
    ///     },
    ///     Arc::new(DefaultClock),
    ///     CourseContentConfig::default(),
    /// );
    /// ```
    pub fn new(
        ports: CourseContentPorts,
        clock: Arc<dyn Clock>,
        config: CourseContentConfig,
    ) -> Self {
        Self {
            repository: ports.repository,
            cache: ports.cache,
            notifications: ports.notifications,
            mail: ports.mail,
            clock,
            config,
        }
    }
}

pub(crate) fn map_repository_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::upstream_failure(format!("course store unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::upstream_failure(format!("course store error: {message}"))
        }
        CourseRepositoryError::Serialization { message } => {
            Error::internal(format!("course document could not be decoded: {message}"))
        }
        CourseRepositoryError::RevisionMismatch { expected, actual } => {
            Error::conflict("course was modified concurrently").with_details(json!({
                "expectedRevision": expected,
                "actualRevision": actual,
                "code": "revision_mismatch",
            }))
        }
        CourseRepositoryError::CourseMissing { course_id } => course_not_found(&course_id),
    }
}

pub(crate) fn course_not_found(course_id: &CourseId) -> Error {
    Error::not_found(format!("course {course_id} not found"))
}

fn require_admin(caller: &CallerIdentity) -> Result<(), Error> {
    if caller.is_admin() {
        return Ok(());
    }
    Err(Error::unauthorized(
        "you are not allowed to access this resource",
    ))
}
