//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use course_backend::domain::CourseContentConfig;
use course_backend::domain::ports::{CourseCache, FixtureCourseCache, FixtureMailSink, MailSink};
use course_backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cache: Arc<dyn CourseCache>,
    pub(crate) mail: Arc<dyn MailSink>,
    pub(crate) course_content: CourseContentConfig,
}

impl ServerConfig {
    /// Construct a configuration with caching and mail disabled.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            cache: Arc::new(FixtureCourseCache),
            mail: Arc::new(FixtureMailSink),
            course_content: CourseContentConfig::default(),
        }
    }

    /// Attach a database connection pool for the store adapters.
    ///
    /// Without a pool every course operation is served by fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CourseCache>) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn with_mail(mut self, mail: Arc<dyn MailSink>) -> Self {
        self.mail = mail;
        self
    }

    #[must_use]
    pub fn with_course_content(mut self, config: CourseContentConfig) -> Self {
        self.course_content = config;
        self
    }
}
