//! Builders wiring the course service and HTTP state from configured ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use course_backend::domain::ports::{
    CourseCache, CourseContentCommand, CourseContentQuery, CourseRepository, IdentityDirectory,
    MailSink, NotificationSink,
};
use course_backend::domain::{CourseContentConfig, CourseContentPorts, CourseContentService};
use course_backend::inbound::http::state::HttpState;
use course_backend::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselIdentityDirectory, DieselNotificationSink,
};

use super::ServerConfig;

/// Store-backed ports that only exist when a database is configured.
struct StorePorts {
    repository: Arc<dyn CourseRepository>,
    notifications: Arc<dyn NotificationSink>,
    identities: Arc<dyn IdentityDirectory>,
}

fn diesel_store_ports(pool: &DbPool) -> StorePorts {
    StorePorts {
        repository: Arc::new(DieselCourseRepository::new(pool.clone())),
        notifications: Arc::new(DieselNotificationSink::new(pool.clone())),
        identities: Arc::new(DieselIdentityDirectory::new(pool.clone())),
    }
}

/// Collaborators shared by every store flavour.
struct SharedPorts {
    cache: Arc<dyn CourseCache>,
    mail: Arc<dyn MailSink>,
    clock: Arc<dyn Clock>,
    config: CourseContentConfig,
}

/// Build state from real services when a pool is available, otherwise from
/// fixtures that reject mutations and serve an empty catalogue.
fn build_http_state_with_pool<Pool>(
    pool: &Option<Pool>,
    make_store: impl FnOnce(&Pool) -> StorePorts,
    shared: SharedPorts,
) -> HttpState {
    let Some(pool) = pool else {
        return HttpState::default();
    };
    let store = make_store(pool);
    let service = Arc::new(CourseContentService::new(
        CourseContentPorts {
            repository: store.repository,
            cache: shared.cache,
            notifications: store.notifications,
            mail: shared.mail,
        },
        shared.clock,
        shared.config,
    ));
    let query: Arc<dyn CourseContentQuery> = service.clone();
    let command: Arc<dyn CourseContentCommand> = service;
    HttpState::new(query, command, store.identities)
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let shared = SharedPorts {
        cache: config.cache.clone(),
        mail: config.mail.clone(),
        clock: Arc::new(DefaultClock),
        config: config.course_content.clone(),
    };
    web::Data::new(build_http_state_with_pool(
        &config.db_pool,
        diesel_store_ports,
        shared,
    ))
}
