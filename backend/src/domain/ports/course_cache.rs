//! Port interface for caching serialised course snapshots.
use std::time::Duration;

use async_trait::async_trait;

use super::{CourseCacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by the caching adapter.
    pub enum CourseCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } => "course cache backend failure: {message}",
    }
}

/// Byte-oriented key-value cache with optional expiry.
///
/// The service owns serialisation so adapters stay format agnostic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCache: Send + Sync {
    /// Read the cached payload for `key`.
    async fn get(&self, key: &CourseCacheKey) -> Result<Option<Vec<u8>>, CourseCacheError>;

    /// Store `payload` under `key`, expiring after `ttl` when given.
    async fn set(
        &self,
        key: &CourseCacheKey,
        payload: &[u8],
        ttl: Option<Duration>,
    ) -> Result<(), CourseCacheError>;

    /// Remove `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &CourseCacheKey) -> Result<(), CourseCacheError>;
}

/// Cache that never stores anything; every read misses.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCache;

#[async_trait]
impl CourseCache for FixtureCourseCache {
    async fn get(&self, _key: &CourseCacheKey) -> Result<Option<Vec<u8>>, CourseCacheError> {
        Ok(None)
    }

    async fn set(
        &self,
        _key: &CourseCacheKey,
        _payload: &[u8],
        _ttl: Option<Duration>,
    ) -> Result<(), CourseCacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &CourseCacheKey) -> Result<(), CourseCacheError> {
        Ok(())
    }
}
