//! Redis-backed course snapshot cache.
//!
//! Connections are pooled with `bb8-redis`. Payloads are opaque bytes; the
//! domain service owns their encoding.

mod redis_course_cache;

pub use redis_course_cache::{RedisCacheConfig, RedisCourseCache};
