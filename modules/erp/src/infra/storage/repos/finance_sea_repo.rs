use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::FinanceLog;
use crate::domain::repos::FinanceRepository;
use crate::infra::storage::entity::finance;
use crate::infra::storage::mapper;

/// SeaORM implementation of [`FinanceRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmFinanceRepository;

#[async_trait]
impl FinanceRepository for SeaOrmFinanceRepository {
    async fn insert<C: ConnectionTrait>(&self, runner: &C, log: FinanceLog) -> DomainResult<FinanceLog> {
        let _ = mapper::finance_log_to_active_model(&log).insert(runner).await?;
        Ok(log)
    }

    async fn find_by_payment<C: ConnectionTrait>(
        &self,
        runner: &C,
        payment_id: Uuid,
    ) -> DomainResult<Option<FinanceLog>> {
        let found = finance::Entity::find()
            .filter(finance::Column::PaymentId.eq(payment_id))
            .one(runner)
            .await?;
        Ok(found.map(Into::into))
    }
}
