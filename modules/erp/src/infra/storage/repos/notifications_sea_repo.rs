use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{Notification, NotificationListQuery, NotificationWithCustomer};
use crate::domain::repos::NotificationsRepository;
use crate::infra::storage::entity::notification;
use crate::infra::storage::mapper;

use super::{customer_name_map, require_ref};

/// SeaORM implementation of [`NotificationsRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmNotificationsRepository;

#[async_trait]
impl NotificationsRepository for SeaOrmNotificationsRepository {
    async fn list<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &NotificationListQuery,
    ) -> DomainResult<Vec<NotificationWithCustomer>> {
        let mut find = notification::Entity::find();
        if let Some(customer_id) = query.customer_id {
            find = find.filter(notification::Column::CustomerId.eq(customer_id));
        }
        if query.unread_only {
            find = find.filter(notification::Column::IsRead.eq(false));
        }
        let rows = find
            .order_by(notification::Column::CreatedAt, Order::Desc)
            .order_by(notification::Column::Id, Order::Desc)
            .limit(query.limit)
            .all(runner)
            .await?;

        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let names = customer_name_map(runner, &customer_ids).await?;

        rows.into_iter()
            .map(|m| {
                let customer_name = require_ref(&names, m.customer_id, "customer")?;
                Ok(NotificationWithCustomer {
                    notification: m.into(),
                    customer_name,
                })
            })
            .collect()
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        notification: Notification,
    ) -> DomainResult<Notification> {
        let _ = mapper::notification_to_active_model(&notification)
            .insert(runner)
            .await?;
        Ok(notification)
    }

    async fn mark_read<C: ConnectionTrait>(&self, runner: &C, ids: &[Uuid]) -> DomainResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.is_in(ids.iter().copied()))
            .exec(runner)
            .await?;
        Ok(result.rows_affected)
    }
}
