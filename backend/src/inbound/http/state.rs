//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseContentCommand, CourseContentQuery, FixtureCourseContentCommand,
    FixtureCourseContentQuery, FixtureIdentityDirectory, IdentityDirectory,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses_query: Arc<dyn CourseContentQuery>,
    pub courses: Arc<dyn CourseContentCommand>,
    pub identities: Arc<dyn IdentityDirectory>,
}

impl HttpState {
    /// Construct state from the driving ports and the identity directory.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use course_backend::domain::ports::{
    ///     FixtureCourseContentCommand, FixtureCourseContentQuery, FixtureIdentityDirectory,
    /// };
    /// use course_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureCourseContentQuery),
    ///     Arc::new(FixtureCourseContentCommand),
    ///     Arc::new(FixtureIdentityDirectory),
    /// );
    /// let _query = state.courses_query.clone();
    /// ```
    pub fn new(
        courses_query: Arc<dyn CourseContentQuery>,
        courses: Arc<dyn CourseContentCommand>,
        identities: Arc<dyn IdentityDirectory>,
    ) -> Self {
        Self {
            courses_query,
            courses,
            identities,
        }
    }
}

impl Default for HttpState {
    /// Fixture-backed state used when no store is configured.
    fn default() -> Self {
        Self::new(
            Arc::new(FixtureCourseContentQuery),
            Arc::new(FixtureCourseContentCommand),
            Arc::new(FixtureIdentityDirectory),
        )
    }
}
