//! PostgreSQL persistence adapters using Diesel.
//!
//! Adapters only translate between rows and domain types. Row structs and
//! the schema stay private to this module; every failure is mapped onto the
//! port's typed error.
//!
//! # Example
//!
//! ```ignore
//! use course_backend::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/courses")).await?;
//! let repo = DieselCourseRepository::new(pool);
//! ```

mod diesel_course_repository;
mod diesel_error_mapping;
mod diesel_identity_directory;
mod diesel_notification_sink;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_identity_directory::DieselIdentityDirectory;
pub use diesel_notification_sink::DieselNotificationSink;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
