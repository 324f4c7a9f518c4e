//! Best-effort cache access. Cache failures degrade to store reads and are
//! never reported to callers.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::CourseContentService;
use crate::domain::ports::CourseCacheKey;

impl CourseContentService {
    /// Decode the snapshot stored under `key`. Backend errors and undecodable
    /// payloads count as misses.
    pub(super) async fn read_cached<T: DeserializeOwned>(&self, key: &CourseCacheKey) -> Option<T> {
        let payload = match self.cache.get(key).await {
            Ok(payload) => payload?,
            Err(error) => {
                warn!(%key, %error, "course cache read failed; falling back to store");
                return None;
            }
        };
        match serde_json::from_slice(&payload) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(%key, %error, "discarding undecodable course cache payload");
                None
            }
        }
    }

    pub(super) async fn write_cached<T>(&self, key: &CourseCacheKey, value: &T, ttl: Option<Duration>)
    where
        T: Serialize + Sync + ?Sized,
    {
        let payload = match serde_json::to_vec(value) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%key, %error, "course snapshot could not be encoded for caching");
                return;
            }
        };
        if let Err(error) = self.cache.set(key, &payload, ttl).await {
            warn!(%key, %error, "course cache write failed");
        }
    }

    pub(super) async fn invalidate(&self, keys: &[CourseCacheKey]) {
        for key in keys {
            if let Err(error) = self.cache.delete(key).await {
                warn!(%key, %error, "course cache invalidation failed");
            }
        }
    }
}
