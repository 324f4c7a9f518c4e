//! Notification and mail dispatch following committed mutations.

use serde_json::json;
use tracing::{debug, warn};

use super::CourseContentService;
use crate::domain::course::{AnswerReceipt, Course, CourseId};
use crate::domain::ports::{MailMessage, Notification, NotificationRecipient};
use crate::domain::{CallerIdentity, Error};

pub(super) const QUESTION_REPLY_TEMPLATE: &str = "question-reply";

impl CourseContentService {
    /// Record a notification. Failures are logged and swallowed.
    pub(super) async fn notify(&self, notification: Notification) {
        if let Err(error) = self.notifications.create(&notification).await {
            warn!(
                title = notification.title.as_str(),
                %error,
                "notification could not be recorded"
            );
        }
    }

    pub(super) async fn announce_question(&self, content_title: &str) {
        self.notify(Notification {
            recipient: NotificationRecipient::Platform,
            title: "New Question Received".to_owned(),
            message: format!("You have a new question in {content_title}"),
        })
        .await;
    }

    /// Tell the asker about a new answer: a notification when they answered
    /// their own question, an email otherwise.
    pub(super) async fn announce_answer(
        &self,
        course_id: &CourseId,
        answerer: &CallerIdentity,
        receipt: AnswerReceipt,
    ) -> Result<(), Error> {
        if receipt.asker.id == answerer.id {
            self.notify(Notification {
                recipient: NotificationRecipient::User(receipt.asker.id),
                title: "New Question Reply Received".to_owned(),
                message: format!("You have a new reply in {}", receipt.content_title),
            })
            .await;
            return Ok(());
        }

        let message = MailMessage {
            recipient_email: receipt.asker.email,
            subject: "Question Reply".to_owned(),
            template_name: QUESTION_REPLY_TEMPLATE.to_owned(),
            template_data: json!({
                "name": receipt.asker.name,
                "title": receipt.content_title,
            }),
        };
        self.mail.send(&message).await.map_err(|error| {
            Error::upstream_failure(format!("answer saved but reply email failed: {error}"))
                .with_details(json!({
                    "mutationCommitted": true,
                    "courseId": course_id.to_string(),
                }))
        })
    }

    /// Compose the review notification. It is logged, never recorded.
    pub(super) fn describe_review(&self, reviewer: &CallerIdentity, course: &Course) {
        let notification = Notification {
            recipient: NotificationRecipient::Platform,
            title: "New Review".to_owned(),
            message: format!("{} has given a review on {}", reviewer.name, course.name()),
        };
        debug!(
            course_id = %course.id(),
            title = notification.title.as_str(),
            message = notification.message.as_str(),
            "review notification composed, not dispatched"
        );
    }
}
