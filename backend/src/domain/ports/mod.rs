//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (store, cache, notification log, mail relay, identity
//! directory) expose typed errors generated by `define_port_error!`. Driving
//! ports return [`crate::domain::Error`] directly.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod course_cache;
mod course_content_command;
mod course_content_query;
mod course_repository;
mod identity_directory;
mod mail_sink;
mod notification_sink;

pub use cache_key::{CATALOGUE_CACHE_KEY, CourseCacheKey, CourseCacheKeyValidationError};
#[cfg(test)]
pub use course_cache::MockCourseCache;
pub use course_cache::{CourseCache, CourseCacheError, FixtureCourseCache};
#[cfg(test)]
pub use course_content_command::MockCourseContentCommand;
pub use course_content_command::{
    AddAnswerRequest, AddQuestionRequest, AddReviewReplyRequest, AddReviewRequest,
    CourseContentCommand, DeleteCourseRequest, EditCourseRequest, FixtureCourseContentCommand,
    PublishCourseRequest,
};
#[cfg(test)]
pub use course_content_query::MockCourseContentQuery;
pub use course_content_query::{CourseContentQuery, FixtureCourseContentQuery};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError, FixtureCourseRepository};
#[cfg(test)]
pub use identity_directory::MockIdentityDirectory;
pub use identity_directory::{
    FixtureIdentityDirectory, IdentityDirectory, IdentityDirectoryError,
};
#[cfg(test)]
pub use mail_sink::MockMailSink;
pub use mail_sink::{FixtureMailSink, MailMessage, MailSink, MailSinkError};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{
    FixtureNotificationSink, Notification, NotificationRecipient, NotificationSink,
    NotificationSinkError,
};
