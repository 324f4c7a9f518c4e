//! Port for the append-only user notification log.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised while recording notifications.
    pub enum NotificationSinkError {
        /// The notification store rejected or failed the write.
        Backend { message: String } => "notification sink failure: {message}",
    }
}

/// Audience of a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "userId")]
pub enum NotificationRecipient {
    /// Platform-wide feed read by administrators.
    Platform,
    /// A single user.
    User(UserId),
}

/// User-facing notification triggered by a content mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub recipient: NotificationRecipient,
    pub title: String,
    pub message: String,
}

/// Write-only notification log.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Record a notification.
    async fn create(&self, notification: &Notification) -> Result<(), NotificationSinkError>;
}

/// Sink that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNotificationSink;

#[async_trait]
impl NotificationSink for FixtureNotificationSink {
    async fn create(&self, _notification: &Notification) -> Result<(), NotificationSinkError> {
        Ok(())
    }
}
