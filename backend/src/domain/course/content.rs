//! Content items and their question threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ContentId, QuestionId};
use crate::domain::UserId;

/// Snapshot of the caller embedded into nested entities at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub name: String,
    /// Empty in preview snapshots.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,
}

/// Supplementary link attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentLink {
    pub title: String,
    pub url: String,
}

/// A single lesson inside a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: ContentId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub video_section: String,
    pub video_length: u32,
    #[serde(default)]
    pub links: Vec<ContentLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl ContentItem {
    pub(super) fn question_mut(&mut self, question_id: &QuestionId) -> Option<&mut Question> {
        self.questions
            .iter_mut()
            .find(|question| &question.id == question_id)
    }
}

/// Input payload for a content item created alongside a new course.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItemDraft {
    pub title: String,
    pub description: String,
    pub video_url: Option<String>,
    pub video_section: String,
    pub video_length: u32,
    pub links: Vec<ContentLink>,
    pub suggestion: Option<String>,
}

impl ContentItemDraft {
    pub(super) fn into_item(self) -> ContentItem {
        ContentItem {
            id: ContentId::random(),
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            video_section: self.video_section,
            video_length: self.video_length,
            links: self.links,
            suggestion: self.suggestion,
            questions: Vec::new(),
        }
    }
}

/// Learner question attached to a content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub author: Author,
    pub question: String,
    #[serde(rename = "questionReplies", default)]
    pub replies: Vec<Answer>,
    pub created_at: DateTime<Utc>,
}

/// Reply to a question. Answers are only addressed through their question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub author: Author,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}
