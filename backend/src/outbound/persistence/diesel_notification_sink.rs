//! PostgreSQL-backed `NotificationSink` writing to the `notifications` table.

use async_trait::async_trait;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    Notification, NotificationRecipient, NotificationSink, NotificationSinkError,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewNotificationRow;
use super::pool::DbPool;
use super::schema::notifications;

/// Status stored with freshly recorded notifications.
const UNREAD_STATUS: &str = "unread";

/// Diesel-backed notification log.
#[derive(Clone)]
pub struct DieselNotificationSink {
    pool: DbPool,
}

impl DieselNotificationSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn recipient_column(recipient: &NotificationRecipient) -> Option<Uuid> {
    match recipient {
        NotificationRecipient::Platform => None,
        NotificationRecipient::User(user_id) => Some(*user_id.as_uuid()),
    }
}

#[async_trait]
impl NotificationSink for DieselNotificationSink {
    async fn create(&self, notification: &Notification) -> Result<(), NotificationSinkError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| map_pool_error(error, |message| NotificationSinkError::backend(message)))?;

        let row = NewNotificationRow {
            id: Uuid::new_v4(),
            recipient_user_id: recipient_column(&notification.recipient),
            title: notification.title.as_str(),
            message: notification.message.as_str(),
            status: UNREAD_STATUS,
        };

        diesel::insert_into(notifications::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| {
                map_diesel_error(
                    error,
                    |message| NotificationSinkError::backend(message),
                    |message| NotificationSinkError::backend(message),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use rstest::rstest;

    #[rstest]
    fn platform_notifications_have_no_recipient() {
        assert_eq!(recipient_column(&NotificationRecipient::Platform), None);
    }

    #[rstest]
    fn user_notifications_store_the_user_id() {
        let user_id = UserId::random();
        assert_eq!(
            recipient_column(&NotificationRecipient::User(user_id.clone())),
            Some(*user_id.as_uuid())
        );
    }
}
