use std::sync::Arc;

use aquaserve_auth::Session;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    CustomerRef, InstalledService, InstalledServicePatch, NewInstalledService, ServiceDetail,
    ServiceWithCustomer,
};
use crate::domain::repos::{CustomersRepository, ServicesRepository};
use crate::domain::service::validate;

/// Installed purifier units. The list endpoint is deliberately unpaginated;
/// fleets stay small enough that the UI renders them whole.
pub struct InstallationsService<R, C>
where
    R: ServicesRepository,
    C: CustomersRepository,
{
    db: DatabaseConnection,
    repo: Arc<R>,
    customers: Arc<C>,
}

impl<R, C> InstallationsService<R, C>
where
    R: ServicesRepository,
    C: CustomersRepository,
{
    pub fn new(db: DatabaseConnection, repo: Arc<R>, customers: Arc<C>) -> Self {
        Self {
            db,
            repo,
            customers,
        }
    }

    #[instrument(skip(self, session), fields(user = %session.user_id))]
    pub async fn list(
        &self,
        session: &Session,
        customer_id: Option<Uuid>,
    ) -> DomainResult<Vec<ServiceWithCustomer>> {
        debug!("listing services");
        self.repo.list(&self.db, customer_id).await
    }

    #[instrument(skip(self, session), fields(user = %session.user_id, service_id = %id))]
    pub async fn get(&self, session: &Session, id: Uuid) -> DomainResult<ServiceDetail> {
        debug!("fetching service detail");
        self.repo
            .get_detail(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service"))
    }

    #[instrument(skip(self, session, input), fields(user = %session.user_id))]
    pub async fn create(
        &self,
        session: &Session,
        input: NewInstalledService,
    ) -> DomainResult<(InstalledService, CustomerRef)> {
        validate::service_type(&input.service_type)?;
        let customer = self
            .customers
            .get(&self.db, input.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer"))?;

        let service = InstalledService {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            service_type: input.service_type,
            installation_date: input.installation_date,
            created_at: Utc::now(),
        };
        let created = self.repo.insert(&self.db, service).await?;
        info!(service_id = %created.id, "service created");
        Ok((created, customer.to_ref()))
    }

    #[instrument(skip(self, session, patch), fields(user = %session.user_id, service_id = %id))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: InstalledServicePatch,
    ) -> DomainResult<InstalledService> {
        if let Some(service_type) = patch.service_type.as_deref() {
            validate::service_type(service_type)?;
        }

        if patch.is_empty() {
            return self
                .repo
                .get(&self.db, id)
                .await?
                .ok_or_else(|| DomainError::not_found("Service"));
        }

        let updated = self
            .repo
            .update(&self.db, id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Service"))?;
        info!(service_id = %id, "service updated");
        Ok(updated)
    }

    #[instrument(skip(self, session), fields(user = %session.user_id, service_id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> DomainResult<()> {
        if !self.repo.exists(&self.db, id).await? {
            return Err(DomainError::not_found("Service"));
        }
        if self.repo.has_linked_records(&self.db, id).await? {
            return Err(DomainError::conflict(
                "Service has linked records and cannot be deleted",
            ));
        }
        if !self.repo.delete(&self.db, id).await? {
            return Err(DomainError::not_found("Service"));
        }
        info!(service_id = %id, "service deleted");
        Ok(())
    }
}
