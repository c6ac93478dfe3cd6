use std::sync::Arc;

use aquaserve_auth::{Role, Session};
use aquaserve_http::{Page, PageParams};
use chrono::Utc;
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    Complaint, ComplaintDetail, ComplaintListQuery, ComplaintPatch, ComplaintStatus,
    ComplaintWithRefs, NewComplaint, Notification,
};
use crate::domain::repos::{
    ComplaintsRepository, CustomersRepository, NotificationsRepository, ServicesRepository,
    UsersRepository,
};
use crate::domain::service::validate;

const DEFAULT_PAGE_LIMIT: u64 = 20;
const NOTIFICATION_KIND: &str = "COMPLAINT_UPDATE";
/// Leading hex of the complaint id quoted back to the customer.
const TICKET_ID_LEN: usize = 8;

pub struct ComplaintsService<R, C, S, U, N>
where
    R: ComplaintsRepository,
    C: CustomersRepository,
    S: ServicesRepository,
    U: UsersRepository,
    N: NotificationsRepository,
{
    db: DatabaseConnection,
    repo: Arc<R>,
    customers: Arc<C>,
    services: Arc<S>,
    users: Arc<U>,
    notifications: Arc<N>,
}

impl<R, C, S, U, N> ComplaintsService<R, C, S, U, N>
where
    R: ComplaintsRepository,
    C: CustomersRepository,
    S: ServicesRepository,
    U: UsersRepository,
    N: NotificationsRepository,
{
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<R>,
        customers: Arc<C>,
        services: Arc<S>,
        users: Arc<U>,
        notifications: Arc<N>,
    ) -> Self {
        Self {
            db,
            repo,
            customers,
            services,
            users,
            notifications,
        }
    }

    /// Technician sessions only ever see their own assignments; the filter
    /// is pinned here, not trusted from the caller.
    #[instrument(skip(self, session, filter), fields(user = %session.user_id))]
    pub async fn list(
        &self,
        session: &Session,
        filter: ComplaintListQuery,
        params: PageParams,
    ) -> DomainResult<Page<ComplaintWithRefs>> {
        debug!("listing complaints");
        let mut query = filter;
        if session.role == Role::Technician {
            query.technician_id = Some(session.user_id);
        }
        let slice = params.resolve(DEFAULT_PAGE_LIMIT);
        self.repo.list_page(&self.db, &query, slice).await
    }

    #[instrument(skip(self, session), fields(user = %session.user_id, complaint_id = %id))]
    pub async fn get(&self, session: &Session, id: Uuid) -> DomainResult<ComplaintDetail> {
        debug!("fetching complaint detail");
        let detail = self
            .repo
            .get_detail(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Complaint"))?;
        if session.role == Role::Technician
            && detail.complaint.technician_id != Some(session.user_id)
        {
            return Err(DomainError::forbidden("Forbidden"));
        }
        Ok(detail)
    }

    /// Registers the complaint and the customer's ticket notification in one
    /// transaction.
    #[instrument(skip(self, session, input), fields(user = %session.user_id))]
    pub async fn create(
        &self,
        session: &Session,
        input: NewComplaint,
    ) -> DomainResult<ComplaintWithRefs> {
        validate::description(&input.description)?;
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

        let complaint = Complaint {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            service_id: input.service_id,
            description: input.description,
            status: ComplaintStatus::Open,
            technician_id: None,
            created_at: Utc::now(),
        };

        let txn = self.db.begin().await?;
        let created = self.repo.insert(&txn, complaint).await?;
        let ticket = created.id.to_string();
        self.notify(
            &txn,
            created.customer_id,
            format!(
                "Your complaint has been registered. Ticket ID: {}",
                &ticket[..TICKET_ID_LEN]
            ),
        )
        .await?;
        txn.commit().await?;

        info!(complaint_id = %created.id, "complaint registered");
        Ok(ComplaintWithRefs {
            complaint: created,
            customer: customer.to_ref(),
            service: service.to_ref(),
            technician: None,
        })
    }

    /// A technician may only touch their own complaints, and only the
    /// status. A status change notifies the customer in the same
    /// transaction as the write.
    #[instrument(skip(self, session, patch), fields(user = %session.user_id, complaint_id = %id))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: ComplaintPatch,
    ) -> DomainResult<ComplaintWithRefs> {
        if let Some(description) = patch.description.as_deref() {
            validate::description(description)?;
        }

        let existing = self
            .repo
            .get(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Complaint"))?;
        if session.role == Role::Technician {
            if existing.technician_id != Some(session.user_id) {
                return Err(DomainError::forbidden("Forbidden"));
            }
            if patch.description.is_some() {
                return Err(DomainError::forbidden("Technicians can only update status"));
            }
        }

        let txn = self.db.begin().await?;
        if !patch.is_empty() {
            self.repo
                .update(&txn, id, &patch)
                .await?
                .ok_or_else(|| DomainError::not_found("Complaint"))?;
        }
        if let Some(status) = patch.status {
            self.notify(
                &txn,
                existing.customer_id,
                format!("Your complaint status updated to: {}", status.to_value()),
            )
            .await?;
        }
        let updated = self
            .repo
            .get_with_refs(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Complaint"))?;
        txn.commit().await?;

        info!(complaint_id = %id, "complaint updated");
        Ok(updated)
    }

    /// Assignment always moves the complaint to in-progress, even when it
    /// was already resolved, and notifies the customer transactionally.
    #[instrument(skip(self, session), fields(user = %session.user_id, complaint_id = %id))]
    pub async fn assign(
        &self,
        session: &Session,
        id: Uuid,
        technician_id: Uuid,
    ) -> DomainResult<ComplaintWithRefs> {
        let technician = match self.users.get(&self.db, technician_id).await? {
            Some(user) if user.role == Role::Technician => user,
            _ => return Err(DomainError::validation("Invalid technician")),
        };

        let txn = self.db.begin().await?;
        self.repo
            .assign(&txn, id, technician_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Complaint"))?;
        let assigned = self
            .repo
            .get_with_refs(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Complaint"))?;
        self.notify(
            &txn,
            assigned.complaint.customer_id,
            format!(
                "Technician {} has been assigned to your complaint.",
                technician.name
            ),
        )
        .await?;
        txn.commit().await?;

        info!(complaint_id = %id, technician_id = %technician_id, "technician assigned");
        Ok(assigned)
    }

    async fn notify<Conn: ConnectionTrait>(
        &self,
        runner: &Conn,
        customer_id: Uuid,
        message: String,
    ) -> DomainResult<()> {
        let notification = Notification {
            id: Uuid::now_v7(),
            customer_id,
            kind: NOTIFICATION_KIND.to_owned(),
            message,
            is_read: false,
            created_at: Utc::now(),
        };
        self.notifications.insert(runner, notification).await?;
        Ok(())
    }
}
