use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{
    Customer, CustomerDetail, CustomerListQuery, CustomerPatch, CustomerWithCounts,
};

/// Persistence operations for customers.
#[async_trait]
pub trait CustomersRepository: Send + Sync {
    /// Page of customers matching the search filter, newest first, each with
    /// its dependent-record counts.
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &CustomerListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<CustomerWithCounts>>;

    async fn get<C: ConnectionTrait>(&self, runner: &C, id: Uuid)
    -> DomainResult<Option<Customer>>;

    /// Customer expanded with recent services, contracts, payments and
    /// complaints.
    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<CustomerDetail>>;

    async fn exists<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool>;

    /// Whether any service, contract, payment, complaint or notification
    /// still references the customer.
    async fn has_linked_records<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<bool>;

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        customer: Customer,
    ) -> DomainResult<Customer>;

    /// Applies the patch; `None` when no row matched.
    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &CustomerPatch,
    ) -> DomainResult<Option<Customer>>;

    /// `true` when a row was deleted.
    async fn delete<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool>;

    async fn count_all<C: ConnectionTrait>(&self, runner: &C) -> DomainResult<u64>;
}
