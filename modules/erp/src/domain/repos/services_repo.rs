use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{
    InstalledService, InstalledServicePatch, ServiceDetail, ServiceWithCustomer,
};

/// Persistence operations for installed services.
#[async_trait]
pub trait ServicesRepository: Send + Sync {
    /// All services, newest first, optionally restricted to one customer.
    /// The service list is not paginated.
    async fn list<C: ConnectionTrait>(
        &self,
        runner: &C,
        customer_id: Option<Uuid>,
    ) -> DomainResult<Vec<ServiceWithCustomer>>;

    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<InstalledService>>;

    /// Service expanded with its customer, contracts and recent complaints.
    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<ServiceDetail>>;

    async fn exists<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool>;

    /// Whether any contract or complaint still references the service.
    async fn has_linked_records<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<bool>;

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        service: InstalledService,
    ) -> DomainResult<InstalledService>;

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &InstalledServicePatch,
    ) -> DomainResult<Option<InstalledService>>;

    async fn delete<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool>;
}
