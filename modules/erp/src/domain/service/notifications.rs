use std::sync::Arc;

use aquaserve_auth::Session;
use aquaserve_http::MAX_PAGE_LIMIT;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    NewNotification, Notification, NotificationListQuery, NotificationWithCustomer,
};
use crate::domain::repos::{CustomersRepository, NotificationsRepository};

const DEFAULT_FEED_LIMIT: u64 = 20;

pub struct NotificationsService<R, C>
where
    R: NotificationsRepository,
    C: CustomersRepository,
{
    db: DatabaseConnection,
    repo: Arc<R>,
    customers: Arc<C>,
}

impl<R, C> NotificationsService<R, C>
where
    R: NotificationsRepository,
    C: CustomersRepository,
{
    pub fn new(db: DatabaseConnection, repo: Arc<R>, customers: Arc<C>) -> Self {
        Self {
            db,
            repo,
            customers,
        }
    }

    /// The feed is a bare newest-first list, not a paginated envelope.
    #[instrument(skip(self, session), fields(user = %session.user_id))]
    pub async fn list(
        &self,
        session: &Session,
        customer_id: Option<Uuid>,
        unread_only: bool,
        limit: Option<u64>,
    ) -> DomainResult<Vec<NotificationWithCustomer>> {
        debug!("listing notifications");
        let query = NotificationListQuery {
            customer_id,
            unread_only,
            limit: limit.unwrap_or(DEFAULT_FEED_LIMIT).clamp(1, MAX_PAGE_LIMIT),
        };
        self.repo.list(&self.db, &query).await
    }

    #[instrument(skip(self, session, input), fields(user = %session.user_id))]
    pub async fn create(
        &self,
        session: &Session,
        input: NewNotification,
    ) -> DomainResult<Notification> {
        if !self.customers.exists(&self.db, input.customer_id).await? {
            return Err(DomainError::not_found("Customer"));
        }
        let notification = Notification {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            kind: input.kind,
            message: input.message,
            is_read: false,
            created_at: Utc::now(),
        };
        let created = self.repo.insert(&self.db, notification).await?;
        info!(notification_id = %created.id, "notification created");
        Ok(created)
    }

    /// Marks the given notifications read; unknown ids are skipped. Returns
    /// how many rows actually changed.
    #[instrument(skip(self, session, ids), fields(user = %session.user_id))]
    pub async fn mark_read(&self, session: &Session, ids: &[Uuid]) -> DomainResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let updated = self.repo.mark_read(&self.db, ids).await?;
        info!(updated, "notifications marked read");
        Ok(updated)
    }
}
