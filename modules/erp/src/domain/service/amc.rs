use std::sync::Arc;

use aquaserve_auth::Session;
use aquaserve_http::{Page, PageParams};
use chrono::Utc;
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    AmcContract, AmcDetail, AmcListQuery, AmcPatch, AmcStatus, AmcWithRefs, NewAmcContract,
};
use crate::domain::repos::{
    AmcRepository, CustomersRepository, PaymentsRepository, ServicesRepository,
};
use crate::domain::service::{time, validate};

const DEFAULT_PAGE_LIMIT: u64 = 20;

pub struct AmcService<R, C, S, P>
where
    R: AmcRepository,
    C: CustomersRepository,
    S: ServicesRepository,
    P: PaymentsRepository,
{
    db: DatabaseConnection,
    repo: Arc<R>,
    customers: Arc<C>,
    services: Arc<S>,
    payments: Arc<P>,
}

impl<R, C, S, P> AmcService<R, C, S, P>
where
    R: AmcRepository,
    C: CustomersRepository,
    S: ServicesRepository,
    P: PaymentsRepository,
{
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<R>,
        customers: Arc<C>,
        services: Arc<S>,
        payments: Arc<P>,
    ) -> Self {
        Self {
            db,
            repo,
            customers,
            services,
            payments,
        }
    }

    #[instrument(skip(self, session, query), fields(user = %session.user_id))]
    pub async fn list(
        &self,
        session: &Session,
        query: &AmcListQuery,
        params: PageParams,
    ) -> DomainResult<Page<AmcWithRefs>> {
        debug!("listing contracts");
        let slice = params.resolve(DEFAULT_PAGE_LIMIT);
        self.repo.list_page(&self.db, query, slice).await
    }

    #[instrument(skip(self, session), fields(user = %session.user_id, contract_id = %id))]
    pub async fn get(&self, session: &Session, id: Uuid) -> DomainResult<AmcDetail> {
        debug!("fetching contract detail");
        self.repo
            .get_detail(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("AMC Contract"))
    }

    /// New contracts always start out active, whatever their dates say.
    #[instrument(skip(self, session, input), fields(user = %session.user_id))]
    pub async fn create(
        &self,
        session: &Session,
        input: NewAmcContract,
    ) -> DomainResult<AmcWithRefs> {
        validate::positive_amount(input.amount)?;
        let customer = self
            .customers
            .get(&self.db, input.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        let service = self
            .services
            .get(&self.db, input.service_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service"))?;

        let contract = AmcContract {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            service_id: input.service_id,
            start_date: input.start_date,
            end_date: input.end_date,
            renewal_date: input.renewal_date,
            amount: input.amount,
            status: AmcStatus::Active,
            created_at: Utc::now(),
        };
        let created = self.repo.insert(&self.db, contract).await?;
        info!(contract_id = %created.id, "contract created");
        Ok(AmcWithRefs {
            contract: created,
            customer: customer.to_ref(),
            service: service.to_ref(),
        })
    }

    #[instrument(skip(self, session, patch), fields(user = %session.user_id, contract_id = %id))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: AmcPatch,
    ) -> DomainResult<AmcContract> {
        if let Some(amount) = patch.amount {
            validate::positive_amount(amount)?;
        }

        if patch.is_empty() {
            return self
                .repo
                .get(&self.db, id)
                .await?
                .ok_or_else(|| DomainError::not_found("AMC Contract"));
        }

        let updated = self
            .repo
            .update(&self.db, id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("AMC Contract"))?;
        info!(contract_id = %id, "contract updated");
        Ok(updated)
    }

    /// Extends the contract by `months` (1 to 36, default 12) calendar
    /// months, moves the renewal date to thirty days before the new end, and
    /// reactivates the contract even if it had expired.
    #[instrument(skip(self, session), fields(user = %session.user_id, contract_id = %id))]
    pub async fn renew(
        &self,
        session: &Session,
        id: Uuid,
        months: Option<i64>,
    ) -> DomainResult<AmcWithRefs> {
        let months = validate::renewal_months(months)?;
        let contract = self
            .repo
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract"))?;

        let renewal = time::renewal_dates(contract.end_date, months)
            .ok_or_else(|| DomainError::invariant("renewal pushed the end date out of range"))?;
        let patch = AmcPatch {
            end_date: Some(renewal.end_date),
            renewal_date: Some(renewal.renewal_date),
            status: Some(AmcStatus::Active),
            amount: None,
        };
        self.repo
            .update(&self.db, id, &patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract"))?;

        let renewed = self
            .repo
            .get_with_refs(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Contract"))?;
        info!(contract_id = %id, months, new_end = %renewal.end_date, "contract renewed");
        Ok(renewed)
    }

    /// Payments keep their history when a contract goes away; they are
    /// detached in the same transaction that removes the contract.
    #[instrument(skip(self, session), fields(user = %session.user_id, contract_id = %id))]
    pub async fn delete(&self, session: &Session, id: Uuid) -> DomainResult<()> {
        if !self.repo.exists(&self.db, id).await? {
            return Err(DomainError::not_found("AMC Contract"));
        }

        let txn = self.db.begin().await?;
        let detached = self.payments.detach_from_amc(&txn, id).await?;
        if !self.repo.delete(&txn, id).await? {
            return Err(DomainError::not_found("AMC Contract"));
        }
        txn.commit().await?;
        info!(contract_id = %id, detached, "contract deleted");
        Ok(())
    }
}
