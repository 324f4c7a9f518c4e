//! Course aggregate: catalogue fields plus nested content, questions,
//! answers, reviews and review replies.
//!
//! All nested mutation goes through [`Course`] so lookups by typed id and
//! the derived `ratings` field stay consistent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Error;

mod content;
mod ids;
mod projection;
mod review;

#[cfg(test)]
mod tests;

pub use content::{Answer, Author, ContentItem, ContentItemDraft, ContentLink, Question};
pub use ids::{ContentId, CourseId, IdParseError, QuestionId, ReviewId};
pub use projection::Projection;
pub use review::{RATING_MAX, RATING_MIN, Rating, Review, ReviewReply};

/// Errors raised by aggregate validation and nested lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CourseError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must not be negative")]
    NegativeAmount { field: &'static str },
    #[error("rating must be between 1 and 5 (got {rating})")]
    RatingOutOfRange { rating: u8 },
    #[error("content {content_id} does not exist in this course")]
    ContentNotFound { content_id: ContentId },
    #[error("question {question_id} does not exist in this content item")]
    QuestionNotFound { question_id: QuestionId },
    #[error("review {review_id} does not exist in this course")]
    ReviewNotFound { review_id: ReviewId },
}

impl From<CourseError> for Error {
    fn from(value: CourseError) -> Self {
        let message = value.to_string();
        match value {
            CourseError::EmptyField { .. }
            | CourseError::NegativeAmount { .. }
            | CourseError::RatingOutOfRange { .. } => Error::invalid_request(message),
            CourseError::ContentNotFound { .. } | CourseError::QuestionNotFound { .. } => {
                Error::invalid_reference(message)
            }
            CourseError::ReviewNotFound { .. } => Error::not_found(message),
        }
    }
}

impl From<IdParseError> for Error {
    fn from(value: IdParseError) -> Self {
        Error::invalid_reference(value.to_string())
    }
}

/// Hosted image reference for the course thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub public_id: String,
    pub url: String,
}

/// Editable catalogue fields of a course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetails {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub estimated_price: Option<f64>,
    pub thumbnail: Option<Thumbnail>,
    pub tags: String,
    pub level: String,
    pub demo_url: String,
}

impl CourseDetails {
    fn validate(&self) -> Result<(), CourseError> {
        ensure_text(&self.name, "name")?;
        ensure_text(&self.description, "description")?;
        ensure_amount(self.price, "price")?;
        if let Some(estimated) = self.estimated_price {
            ensure_amount(estimated, "estimatedPrice")?;
        }
        Ok(())
    }
}

/// Input payload for [`Course::publish`].
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    pub details: CourseDetails,
    pub content: Vec<ContentItemDraft>,
}

/// What an answer mutation needs to notify or mail the original asker.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerReceipt {
    pub content_title: String,
    pub asker: Author,
}

/// Course aggregate root.
///
/// ## Invariants
/// - Nested ids are unique within their parent sequence.
/// - `ratings` is the mean of every review rating, or `0.0` without reviews.
/// - `revision` increases by one on every persisted change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    id: CourseId,
    #[serde(default)]
    revision: u32,
    name: String,
    description: String,
    price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail: Option<Thumbnail>,
    tags: String,
    level: String,
    demo_url: String,
    #[serde(rename = "courseData", default)]
    content: Vec<ContentItem>,
    #[serde(default)]
    reviews: Vec<Review>,
    #[serde(default)]
    ratings: f64,
    #[serde(default)]
    purchased: u32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Course {
    /// Build a brand-new course at revision 1 with fresh nested ids.
    pub fn publish(draft: CourseDraft, now: DateTime<Utc>) -> Result<Self, CourseError> {
        draft.details.validate()?;
        for item in &draft.content {
            ensure_text(&item.title, "courseData.title")?;
        }
        let CourseDetails {
            name,
            description,
            price,
            estimated_price,
            thumbnail,
            tags,
            level,
            demo_url,
        } = draft.details;

        Ok(Self {
            id: CourseId::random(),
            revision: 1,
            name,
            description,
            price,
            estimated_price,
            thumbnail,
            tags,
            level,
            demo_url,
            content: draft
                .content
                .into_iter()
                .map(ContentItemDraft::into_item)
                .collect(),
            reviews: Vec::new(),
            ratings: 0.0,
            purchased: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> CourseId {
        self.id
    }
    pub fn revision(&self) -> u32 {
        self.revision
    }
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
    pub fn price(&self) -> f64 {
        self.price
    }
    pub fn estimated_price(&self) -> Option<f64> {
        self.estimated_price
    }
    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }
    pub fn tags(&self) -> &str {
        self.tags.as_str()
    }
    pub fn level(&self) -> &str {
        self.level.as_str()
    }
    pub fn demo_url(&self) -> &str {
        self.demo_url.as_str()
    }
    pub fn content(&self) -> &[ContentItem] {
        self.content.as_slice()
    }
    pub fn reviews(&self) -> &[Review] {
        self.reviews.as_slice()
    }
    pub fn ratings(&self) -> f64 {
        self.ratings
    }
    pub fn purchased(&self) -> u32 {
        self.purchased
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Consume the aggregate, keeping only its lesson sequence.
    pub fn into_content(self) -> Vec<ContentItem> {
        self.content
    }

    /// Override the revision with the value held by the store.
    pub fn with_revision(mut self, revision: u32) -> Self {
        self.revision = revision;
        self
    }

    /// Record a persisted change: advance the revision and stamp `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.revision = self.revision.saturating_add(1);
        self.updated_at = now;
    }

    /// Find a review by id.
    pub fn review(&self, review_id: &ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|review| &review.id == review_id)
    }

    fn content_item_mut(&mut self, content_id: &ContentId) -> Result<&mut ContentItem, CourseError> {
        self.content
            .iter_mut()
            .find(|item| &item.id == content_id)
            .ok_or(CourseError::ContentNotFound {
                content_id: *content_id,
            })
    }

    /// Append a question to a content item and return the item title.
    pub fn add_question(
        &mut self,
        content_id: &ContentId,
        author: Author,
        text: String,
        now: DateTime<Utc>,
    ) -> Result<(QuestionId, String), CourseError> {
        ensure_text(&text, "question")?;
        let item = self.content_item_mut(content_id)?;
        let id = QuestionId::random();
        item.questions.push(Question {
            id,
            author,
            question: text,
            replies: Vec::new(),
            created_at: now,
        });
        Ok((id, item.title.clone()))
    }

    /// Append an answer beneath a question.
    pub fn add_answer(
        &mut self,
        content_id: &ContentId,
        question_id: &QuestionId,
        author: Author,
        text: String,
        now: DateTime<Utc>,
    ) -> Result<AnswerReceipt, CourseError> {
        ensure_text(&text, "answer")?;
        let item = self.content_item_mut(content_id)?;
        let content_title = item.title.clone();
        let question = item
            .question_mut(question_id)
            .ok_or(CourseError::QuestionNotFound {
                question_id: *question_id,
            })?;
        question.replies.push(Answer {
            author,
            answer: text,
            created_at: now,
        });
        Ok(AnswerReceipt {
            content_title,
            asker: question.author.clone(),
        })
    }

    /// Append a review and recompute the mean rating over every review.
    pub fn add_review(
        &mut self,
        author: Author,
        rating: Rating,
        comment: String,
        now: DateTime<Utc>,
    ) -> Result<ReviewId, CourseError> {
        ensure_text(&comment, "review")?;
        let id = ReviewId::random();
        self.reviews.push(Review {
            id,
            author,
            rating,
            comment,
            replies: None,
            created_at: now,
        });
        self.ratings = review::mean_rating(&self.reviews);
        Ok(id)
    }

    /// Append a reply beneath a review, creating the thread on first use.
    pub fn add_review_reply(
        &mut self,
        review_id: &ReviewId,
        author: Author,
        comment: String,
        now: DateTime<Utc>,
    ) -> Result<(), CourseError> {
        ensure_text(&comment, "comment")?;
        let review = self
            .reviews
            .iter_mut()
            .find(|review| &review.id == review_id)
            .ok_or(CourseError::ReviewNotFound {
                review_id: *review_id,
            })?;
        review.replies.get_or_insert_with(Vec::new).push(ReviewReply {
            author,
            comment,
            created_at: now,
        });
        Ok(())
    }

    /// Replace the catalogue fields, keeping lessons and reviews intact.
    pub fn apply_details(&mut self, details: CourseDetails) -> Result<(), CourseError> {
        details.validate()?;
        self.name = details.name;
        self.description = details.description;
        self.price = details.price;
        self.estimated_price = details.estimated_price;
        self.thumbnail = details.thumbnail;
        self.tags = details.tags;
        self.level = details.level;
        self.demo_url = details.demo_url;
        Ok(())
    }
}

fn ensure_text(value: &str, field: &'static str) -> Result<(), CourseError> {
    if value.trim().is_empty() {
        return Err(CourseError::EmptyField { field });
    }
    Ok(())
}

fn ensure_amount(value: f64, field: &'static str) -> Result<(), CourseError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CourseError::NegativeAmount { field });
    }
    Ok(())
}
