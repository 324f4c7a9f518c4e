//! Read projections applied to course snapshots.

use super::Course;

/// Shape of the course document returned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Every field, including gated lesson material and threads.
    #[default]
    Full,
    /// Catalogue view safe to show before purchase.
    Preview,
}

impl Course {
    /// Apply `projection` to an owned snapshot.
    pub fn project(self, projection: Projection) -> Self {
        match projection {
            Projection::Full => self,
            Projection::Preview => self.into_preview(),
        }
    }

    /// Strip video urls, suggestions, links, question threads, review
    /// replies and reviewer emails.
    pub fn into_preview(mut self) -> Self {
        for item in &mut self.content {
            item.video_url = None;
            item.suggestion = None;
            item.links.clear();
            item.questions.clear();
        }
        for review in &mut self.reviews {
            review.replies = None;
            review.author.email.clear();
        }
        self
    }
}
