use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::model::{Notification, NotificationWithCustomer};

use super::customers::CustomerBriefDto;

/// The wire keeps the original `type` key for the notification tag.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationDto {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            customer_id: n.customer_id,
            kind: n.kind,
            message: n.message,
            is_read: n.is_read,
            created_at: n.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationListItemDto {
    #[serde(flatten)]
    pub notification: NotificationDto,
    pub customer: CustomerBriefDto,
}

impl From<NotificationWithCustomer> for NotificationListItemDto {
    fn from(row: NotificationWithCustomer) -> Self {
        let customer = CustomerBriefDto {
            id: row.notification.customer_id,
            name: row.customer_name,
        };
        Self {
            notification: row.notification.into(),
            customer,
        }
    }
}

/// Creation body. All three fields are required; the handler rejects any
/// gap with one `Missing required fields` message rather than per-field
/// deserialization errors, matching the original API.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub customer_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<String>,
}

/// Bulk mark-read body; `ids` must be present and an array.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MarkReadRequest {
    pub ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct NotificationsMarkedResponse {
    pub success: bool,
    pub updated: u64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListParams {
    pub customer_id: Option<Uuid>,
    /// `unread=true` narrows the feed to unread rows.
    pub unread: Option<bool>,
    pub limit: Option<u64>,
}
