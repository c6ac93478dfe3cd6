use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::FinanceLog;

/// Append-only finance ledger. No update or delete paths exist.
#[async_trait]
pub trait FinanceRepository: Send + Sync {
    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        log: FinanceLog,
    ) -> DomainResult<FinanceLog>;

    async fn find_by_payment<C: ConnectionTrait>(
        &self,
        runner: &C,
        payment_id: Uuid,
    ) -> DomainResult<Option<FinanceLog>>;
}
