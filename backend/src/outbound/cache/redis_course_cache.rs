//! `CourseCache` adapter over a pooled Redis connection.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::AsyncCommands;
use bb8_redis::{RedisConnectionManager, bb8};

use crate::domain::ports::{CourseCache, CourseCacheError, CourseCacheKey};

type RedisPool = bb8::Pool<RedisConnectionManager>;

/// Connection settings for [`RedisCourseCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisCacheConfig {
    pub url: String,
    pub max_size: u32,
    pub connection_timeout: Duration,
}

impl RedisCacheConfig {
    /// Defaults: 8 connections, 2 second checkout timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_size: 8,
            connection_timeout: Duration::from_secs(2),
        }
    }
}

/// Redis implementation of the `CourseCache` port.
#[derive(Clone)]
pub struct RedisCourseCache {
    pool: RedisPool,
}

impl RedisCourseCache {
    /// Build the connection pool.
    ///
    /// # Errors
    ///
    /// Returns [`CourseCacheError::Backend`] when the URL is invalid or the
    /// pool cannot be created.
    pub async fn connect(config: RedisCacheConfig) -> Result<Self, CourseCacheError> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|err| CourseCacheError::backend(format!("invalid redis url: {err}")))?;
        let pool = bb8::Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| CourseCacheError::backend(err.to_string()))?;
        Ok(Self { pool })
    }

    async fn connection(
        &self,
    ) -> Result<bb8::PooledConnection<'_, RedisConnectionManager>, CourseCacheError> {
        self.pool
            .get()
            .await
            .map_err(|err| CourseCacheError::backend(format!("redis checkout failed: {err}")))
    }
}

/// Redis rejects `EX 0`, so sub-second expiries round up to one second.
fn expiry_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CourseCache for RedisCourseCache {
    async fn get(&self, key: &CourseCacheKey) -> Result<Option<Vec<u8>>, CourseCacheError> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<Vec<u8>>>(key.as_str())
            .await
            .map_err(|err| CourseCacheError::backend(err.to_string()))
    }

    async fn set(
        &self,
        key: &CourseCacheKey,
        payload: &[u8],
        ttl: Option<Duration>,
    ) -> Result<(), CourseCacheError> {
        let mut conn = self.connection().await?;
        let outcome = match ttl {
            Some(ttl) => {
                conn.set_ex::<_, _, ()>(key.as_str(), payload, expiry_seconds(ttl))
                    .await
            }
            None => conn.set::<_, _, ()>(key.as_str(), payload).await,
        };
        outcome.map_err(|err| CourseCacheError::backend(err.to_string()))
    }

    async fn delete(&self, key: &CourseCacheKey) -> Result<(), CourseCacheError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(key.as_str())
            .await
            .map_err(|err| CourseCacheError::backend(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Duration::from_secs(604_800), 604_800)]
    #[case(Duration::from_millis(1_500), 1)]
    #[case(Duration::from_millis(10), 1)]
    fn expiry_is_whole_seconds_and_never_zero(#[case] ttl: Duration, #[case] expected: u64) {
        assert_eq!(expiry_seconds(ttl), expected);
    }

    #[rstest]
    fn config_defaults() {
        let config = RedisCacheConfig::new("redis://127.0.0.1:6379");
        assert_eq!(config.max_size, 8);
        assert_eq!(config.connection_timeout, Duration::from_secs(2));
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_url_is_a_backend_error() {
        let result = RedisCourseCache::connect(RedisCacheConfig::new("not a url")).await;
        assert!(matches!(result, Err(CourseCacheError::Backend { .. })));
    }
}
