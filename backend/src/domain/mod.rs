//! Domain primitives, aggregates and services.
//!
//! Purpose: define the course aggregate with its nested entities, the ports
//! it talks through, and the service that implements the course driving
//! ports. Nothing here depends on actix, diesel or redis.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - course: the aggregate, typed ids and projections.
//! - CourseContentService: read-through cache and nested mutations.

pub mod course;
pub mod course_content;
pub mod error;
pub mod identity;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::course_content::{CourseContentConfig, CourseContentPorts, CourseContentService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{CallerIdentity, Role};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use course_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("admins only"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
