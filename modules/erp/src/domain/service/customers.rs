use std::sync::Arc;

use aquaserve_auth::Session;
use aquaserve_http::{Page, PageParams};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    Customer, CustomerDetail, CustomerListQuery, CustomerPatch, CustomerWithCounts, NewCustomer,
};
use crate::domain::repos::CustomersRepository;
use crate::domain::service::validate;

const DEFAULT_PAGE_LIMIT: u64 = 10;

pub struct CustomersService<R: CustomersRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
}

impl<R: CustomersRepository> CustomersService<R> {
    pub fn new(db: DatabaseConnection, repo: Arc<R>) -> Self {
        Self { db, repo }
    }

    #[instrument(skip(self, session, query), fields(user = %session.user_id))]
    pub async fn list(
        &self,
        session: &Session,
        query: &CustomerListQuery,
        params: PageParams,
    ) -> DomainResult<Page<CustomerWithCounts>> {
        debug!("listing customers");
        let slice = params.resolve(DEFAULT_PAGE_LIMIT);
        self.repo.list_page(&self.db, query, slice).await
    }

    #[instrument(skip(self, session), fields(user = %session.user_id, customer_id = %id))]
    pub async fn get(&self, session: &Session, id: Uuid) -> DomainResult<CustomerDetail> {
        debug!("fetching customer detail");
        self.repo
            .get_detail(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer"))
    }

    #[instrument(skip(self, session, input), fields(user = %session.user_id))]
    pub async fn create(&self, session: &Session, input: NewCustomer) -> DomainResult<Customer> {
        validate::name(&input.name)?;
        validate::phone(&input.phone)?;
        if let Some(email) = input.email.as_deref() {
            validate::email(email)?;
        }
        validate::address(&input.address)?;

        let customer = Customer {
            id: Uuid::now_v7(),
            name: input.name,
            phone: input.phone,
            email: input.email,
            address: input.address,
            created_at: Utc::now(),
        };
        let created = self.repo.insert(&self.db, customer).await?;
        info!(customer_id = %created.id, "customer created");
        Ok(created)
    }

    #[instrument(skip(self, session, patch), fields(user = %session.user_id, customer_id = %id))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: CustomerPatch,
    ) -> DomainResult<Customer> {
        if let Some(name) = patch.name.as_deref() {
            validate::name(name)?;
        }
        if let Some(phone) = patch.phone.as_deref() {
            validate::phone(phone)?;
        }
        if let Some(email) = patch.email.as_deref() {
            validate::email(email)?;
        }
        if let Some(address) = patch.address.as_deref() {
            validate::address(address)?;
        }

        // An empty patch writes nothing and echoes the current row.
        if patch.is_empty() {
            return self
                .repo
                .get(&self.db, id)
                .await?
                .ok_or_else(|| DomainError::not_found("Customer"));
        }

        let updated = self
            .repo
            .update(&self.db, id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        info!(customer_id = %id, "customer updated");
        Ok(updated)
    }

    /// Deleting is refused while any dependent record still points at the
    /// customer.
    #[instrument(skip(self, session), fields(user = %session.user_id, customer_id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> DomainResult<()> {
        if !self.repo.exists(&self.db, id).await? {
            return Err(DomainError::not_found("Customer"));
        }
        if self.repo.has_linked_records(&self.db, id).await? {
            return Err(DomainError::conflict(
                "Customer has linked records and cannot be deleted",
            ));
        }
        if !self.repo.delete(&self.db, id).await? {
            return Err(DomainError::not_found("Customer"));
        }
        info!(customer_id = %id, "customer deleted");
        Ok(())
    }
}
