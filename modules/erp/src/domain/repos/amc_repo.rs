use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{AmcContract, AmcDetail, AmcListQuery, AmcPatch, AmcStatus, AmcWithRefs};

/// Persistence operations for annual maintenance contracts.
#[async_trait]
pub trait AmcRepository: Send + Sync {
    /// Page of contracts, soonest end date first.
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &AmcListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<AmcWithRefs>>;

    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<AmcContract>>;

    /// One contract with its projections, the shape write responses use.
    async fn get_with_refs<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<AmcWithRefs>>;

    /// Contract expanded with customer, service and payment history.
    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<AmcDetail>>;

    async fn exists<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool>;

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        contract: AmcContract,
    ) -> DomainResult<AmcContract>;

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &AmcPatch,
    ) -> DomainResult<Option<AmcContract>>;

    async fn delete<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool>;

    /// Contract counts grouped by status.
    async fn status_counts<C: ConnectionTrait>(
        &self,
        runner: &C,
    ) -> DomainResult<Vec<(AmcStatus, u64)>>;

    /// Active contracts whose end date falls inside `(from, to]`.
    async fn count_active_expiring<C: ConnectionTrait>(
        &self,
        runner: &C,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<u64>;
}
