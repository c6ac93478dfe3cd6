use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{Notification, NotificationListQuery, NotificationWithCustomer};

/// Persistence operations for customer notifications.
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    /// Newest-first feed with the customer's name attached.
    async fn list<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &NotificationListQuery,
    ) -> DomainResult<Vec<NotificationWithCustomer>>;

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        notification: Notification,
    ) -> DomainResult<Notification>;

    /// Marks the given notifications read; returns how many rows changed.
    async fn mark_read<C: ConnectionTrait>(&self, runner: &C, ids: &[Uuid]) -> DomainResult<u64>;
}
