use chrono::{DateTime, Utc};
use uuid::Uuid;

/// In-app notification for a customer. `kind` is a free-form tag the UI
/// groups by (for example `COMPLAINT_UPDATE`).
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub customer_id: Uuid,
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationWithCustomer {
    pub notification: Notification,
    pub customer_name: String,
}

/// Filters for the notification feed; `limit` is already resolved.
#[derive(Debug, Clone, Copy)]
pub struct NotificationListQuery {
    pub customer_id: Option<Uuid>,
    pub unread_only: bool,
    pub limit: u64,
}
