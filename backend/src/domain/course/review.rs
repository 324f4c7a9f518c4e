//! Course reviews, ratings and review replies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CourseError;
use super::content::Author;
use super::ids::ReviewId;

/// Lowest accepted star rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted star rating.
pub const RATING_MAX: u8 = 5;

/// Integer star rating in `1..=5`.
///
/// # Examples
/// ```
/// use course_backend::domain::course::Rating;
///
/// assert!(Rating::new(5).is_ok());
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw rating value.
    pub fn new(value: u8) -> Result<Self, CourseError> {
        if !(RATING_MIN..=RATING_MAX).contains(&value) {
            return Err(CourseError::RatingOutOfRange { rating: value });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = CourseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

/// Review left by an entitled learner.
///
/// `replies` distinguishes "never replied" (`None`) from an emptied thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub author: Author,
    pub rating: Rating,
    pub comment: String,
    #[serde(
        rename = "commentReplies",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub replies: Option<Vec<ReviewReply>>,
    pub created_at: DateTime<Utc>,
}

/// Reply posted beneath a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReply {
    pub author: Author,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Arithmetic mean of every rating, `0.0` when there are none.
pub(super) fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews
        .iter()
        .map(|review| u32::from(review.rating.get()))
        .sum();
    f64::from(total) / reviews.len() as f64
}
