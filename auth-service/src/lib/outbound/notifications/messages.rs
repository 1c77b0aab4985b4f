use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::credentials::notification::Notification;

/// Serializable envelope for a notification on the broker.
///
/// Infrastructure representation consumed by the mail sender.
#[derive(Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub event_id: String,
    pub topic: String,
    pub recipient: String,
    pub header: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationMessage {
    fn from(notification: Notification) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            topic: notification.topic,
            recipient: notification.recipient,
            header: notification.header,
            message: notification.message,
            created_at: Utc::now(),
        }
    }
}
