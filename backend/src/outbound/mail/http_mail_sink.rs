//! Reqwest-backed mail relay adapter.
//!
//! The relay renders the named template; this adapter only posts the message
//! as JSON and maps transport and status failures.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::domain::ports::{MailMessage, MailSink, MailSinkError};

const MAX_ERROR_BODY_CHARS: usize = 256;

/// Mail sink that POSTs each message to one relay endpoint.
pub struct HttpMailSink {
    client: Client,
    endpoint: Url,
}

impl HttpMailSink {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl MailSink for HttpMailSink {
    async fn send(&self, message: &MailMessage) -> Result<(), MailSinkError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(message)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }
}

fn map_transport_error(error: reqwest::Error) -> MailSinkError {
    if error.is_timeout() {
        MailSinkError::transport(format!("mail relay timed out: {error}"))
    } else {
        MailSinkError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailSinkError {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    let message = if trimmed.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned()
    } else {
        trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
    };
    MailSinkError::rejected(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_body_falls_back_to_reason_phrase() {
        let err = map_status_error(StatusCode::SERVICE_UNAVAILABLE, b"  ");
        assert_eq!(
            err,
            MailSinkError::rejected(503_u16, "Service Unavailable")
        );
    }

    #[rstest]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(MAX_ERROR_BODY_CHARS * 2);
        let MailSinkError::Rejected { status, message } =
            map_status_error(StatusCode::BAD_REQUEST, body.as_bytes())
        else {
            panic!("expected a rejection");
        };
        assert_eq!(status, 400);
        assert_eq!(message.len(), MAX_ERROR_BODY_CHARS);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_relay_is_a_transport_error() {
        let endpoint = Url::parse("http://127.0.0.1:9/mail").expect("valid url");
        let sink = HttpMailSink::new(endpoint, Duration::from_millis(200)).expect("client");
        let message = MailMessage {
            recipient_email: "ada@example.com".to_owned(),
            subject: "Question Reply".to_owned(),
            template_name: "question-reply".to_owned(),
            template_data: serde_json::json!({}),
        };
        let result = sink.send(&message).await;
        assert!(matches!(result, Err(MailSinkError::Transport { .. })));
    }
}
