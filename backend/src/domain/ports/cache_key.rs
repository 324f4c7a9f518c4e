//! Cache keys for course snapshots.
use thiserror::Error;

use crate::domain::course::CourseId;

/// Sentinel key holding the serialised catalogue of course previews.
pub const CATALOGUE_CACHE_KEY: &str = "allCourses";

/// Cache key used to store and retrieve course snapshots.
///
/// # Examples
/// ```
/// use course_backend::domain::course::CourseId;
/// use course_backend::domain::ports::CourseCacheKey;
///
/// assert_eq!(CourseCacheKey::catalogue().as_str(), "allCourses");
/// let id = CourseId::random();
/// assert_eq!(CourseCacheKey::course(&id).as_str(), id.to_string());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseCacheKey(String);

impl CourseCacheKey {
    /// Key for a single course preview: the bare course id.
    pub fn course(course_id: &CourseId) -> Self {
        Self(course_id.to_string())
    }

    /// Key for the full list of course previews.
    pub fn catalogue() -> Self {
        Self(CATALOGUE_CACHE_KEY.to_owned())
    }

    /// Construct an arbitrary key after validating that it is non-empty and
    /// trimmed.
    pub fn new(value: impl Into<String>) -> Result<Self, CourseCacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CourseCacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(CourseCacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CourseCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CourseCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`CourseCacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseCacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("course cache key must not be empty")]
    Empty,
    /// Key contains leading or trailing whitespace.
    #[error("course cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}

#[cfg(test)]
mod tests {
    //! Validates key construction.
    use super::{CourseCacheKey, CourseCacheKeyValidationError};
    use crate::domain::course::CourseId;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn cache_key_rejects_blank(#[case] value: &str) {
        let err = CourseCacheKey::new(value).expect_err("blank keys rejected");
        assert_eq!(err, CourseCacheKeyValidationError::Empty);
    }

    #[rstest]
    #[case(" leading")]
    #[case("trailing ")]
    fn cache_key_rejects_whitespace_padding(#[case] value: &str) {
        let err = CourseCacheKey::new(value).expect_err("padded key rejected");
        assert_eq!(err, CourseCacheKeyValidationError::ContainsWhitespace);
    }

    #[rstest]
    fn course_and_catalogue_keys_never_collide() {
        let course = CourseCacheKey::course(&CourseId::random());
        assert_ne!(course, CourseCacheKey::catalogue());
    }
}
