//! Port for templated transactional email.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail adapters.
    pub enum MailSinkError {
        /// The relay could not be reached or timed out.
        Transport { message: String } => "mail transport failed: {message}",
        /// The relay answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "mail relay rejected message ({status}): {message}",
    }
}

/// Email rendered by the relay from a named template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailMessage {
    pub recipient_email: String,
    pub subject: String,
    pub template_name: String,
    pub template_data: Value,
}

/// Templated email dispatch.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSink: Send + Sync {
    /// Send a single message. Failures propagate to the caller.
    async fn send(&self, message: &MailMessage) -> Result<(), MailSinkError>;
}

/// Sink that accepts and drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMailSink;

#[async_trait]
impl MailSink for FixtureMailSink {
    async fn send(&self, _message: &MailMessage) -> Result<(), MailSinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn message_serialises_camel_case() {
        let message = MailMessage {
            recipient_email: "ada@example.com".to_owned(),
            subject: "Question Reply".to_owned(),
            template_name: "question-reply".to_owned(),
            template_data: json!({ "name": "Ada", "title": "Ownership" }),
        };
        let value = serde_json::to_value(&message).expect("serialise message");
        assert_eq!(value["recipientEmail"], "ada@example.com");
        assert_eq!(value["templateName"], "question-reply");
    }

    #[rstest]
    fn rejected_error_mentions_status() {
        let err = MailSinkError::rejected(503_u16, "unavailable");
        assert!(err.to_string().contains("503"));
    }
}
