use std::sync::Arc;

use aquaserve_auth::Session;
use aquaserve_http::{Page, PageParams};
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    CustomerRef, FinanceKind, FinanceLog, NewPayment, Payment, PaymentDetail, PaymentListQuery,
    PaymentPatch, PaymentStats, PaymentStatus, PaymentWithRefs,
};
use crate::domain::repos::{
    AmcRepository, CustomersRepository, FinanceRepository, PaymentsRepository,
};
use crate::domain::service::{time, validate};

const DEFAULT_PAGE_LIMIT: u64 = 20;
const RECENT_TRANSACTIONS: u64 = 10;

pub struct PaymentsService<R, C, A, F>
where
    R: PaymentsRepository,
    C: CustomersRepository,
    A: AmcRepository,
    F: FinanceRepository,
{
    db: DatabaseConnection,
    repo: Arc<R>,
    customers: Arc<C>,
    amc: Arc<A>,
    finance: Arc<F>,
}

impl<R, C, A, F> PaymentsService<R, C, A, F>
where
    R: PaymentsRepository,
    C: CustomersRepository,
    A: AmcRepository,
    F: FinanceRepository,
{
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<R>,
        customers: Arc<C>,
        amc: Arc<A>,
        finance: Arc<F>,
    ) -> Self {
        Self {
            db,
            repo,
            customers,
            amc,
            finance,
        }
    }

    #[instrument(skip(self, session, query), fields(user = %session.user_id))]
    pub async fn list(
        &self,
        session: &Session,
        query: &PaymentListQuery,
        params: PageParams,
    ) -> DomainResult<Page<PaymentWithRefs>> {
        debug!("listing payments");
        let slice = params.resolve(DEFAULT_PAGE_LIMIT);
        self.repo.list_page(&self.db, query, slice).await
    }

    #[instrument(skip(self, session), fields(user = %session.user_id, payment_id = %id))]
    pub async fn get(&self, session: &Session, id: Uuid) -> DomainResult<PaymentDetail> {
        debug!("fetching payment detail");
        self.repo
            .get_detail(&self.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))
    }

    /// Records a payment as PAID and appends the matching income ledger
    /// entry. Both rows commit together or not at all.
    #[instrument(skip(self, session, input), fields(user = %session.user_id))]
    pub async fn create(
        &self,
        session: &Session,
        input: NewPayment,
    ) -> DomainResult<(Payment, CustomerRef)> {
        validate::positive_amount(input.amount)?;
        let customer = self
            .customers
            .get(&self.db, input.customer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Customer"))?;
        if let Some(amc_id) = input.amc_id {
            if !self.amc.exists(&self.db, amc_id).await? {
                return Err(DomainError::not_found("AMC Contract"));
            }
        }

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::now_v7(),
            customer_id: input.customer_id,
            amc_id: input.amc_id,
            amount: input.amount,
            payment_mode: input.payment_mode,
            payment_date: Some(input.payment_date.unwrap_or(now)),
            status: PaymentStatus::Paid,
            created_at: now,
        };

        let txn = self.db.begin().await?;
        let created = self.repo.insert(&txn, payment).await?;
        let log = FinanceLog {
            id: Uuid::now_v7(),
            kind: FinanceKind::Income,
            payment_id: created.id,
            amount: created.amount,
            created_at: now,
        };
        self.finance.insert(&txn, log).await?;
        txn.commit().await?;

        info!(payment_id = %created.id, amount = %created.amount, "payment recorded");
        Ok((created, customer.to_ref()))
    }

    #[instrument(skip(self, session, patch), fields(user = %session.user_id, payment_id = %id))]
    pub async fn update(
        &self,
        session: &Session,
        id: Uuid,
        patch: &PaymentPatch,
    ) -> DomainResult<Payment> {
        let updated = self
            .repo
            .update(&self.db, id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment"))?;
        info!(payment_id = %id, status = ?patch.status, "payment updated");
        Ok(updated)
    }

    /// Revenue KPIs. The reads are independent and fan out concurrently.
    #[instrument(skip(self, session), fields(user = %session.user_id))]
    pub async fn stats(&self, session: &Session) -> DomainResult<PaymentStats> {
        let now = Utc::now();
        let this_month = time::month_start(now);
        let last_month = time::prev_month_start(now);

        let (total, monthly, previous, pending, failed, recent) = tokio::try_join!(
            self.repo.sum_paid(&self.db, None, None),
            self.repo.sum_paid(&self.db, Some(this_month), None),
            self.repo.sum_paid(&self.db, Some(last_month), Some(this_month)),
            self.repo.status_totals(&self.db, PaymentStatus::Pending),
            self.repo.status_totals(&self.db, PaymentStatus::Failed),
            self.repo.recent_with_customer(&self.db, RECENT_TRANSACTIONS),
        )?;

        Ok(PaymentStats {
            total_revenue: total,
            monthly_revenue: monthly,
            percent_change: percent_change(monthly, previous),
            pending_amount: pending.0,
            pending_count: pending.1,
            failed_amount: failed.0,
            failed_count: failed.1,
            recent_payments: recent,
        })
    }
}

/// Month-over-month change in percent, one decimal place, rounded half away
/// from zero. Zero when the previous month had no revenue.
fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    ((current - previous) / previous * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_is_zero_without_a_baseline() {
        assert_eq!(
            percent_change(Decimal::new(4500, 0), Decimal::ZERO),
            Decimal::ZERO
        );
    }

    #[test]
    fn percent_change_rounds_to_one_decimal() {
        // 3200 -> 4500 is a 40.625% increase.
        let change = percent_change(Decimal::new(4500, 0), Decimal::new(3200, 0));
        assert_eq!(change.to_string(), "40.6");

        // Half rounds away from zero, like the UI always displayed it.
        let change = percent_change(Decimal::new(1025, 0), Decimal::new(1000, 0));
        assert_eq!(change.to_string(), "2.5");
        let change = percent_change(Decimal::new(10025, 1), Decimal::new(1000, 0));
        assert_eq!(change.to_string(), "0.3");
    }

    #[test]
    fn percent_change_handles_declines() {
        let change = percent_change(Decimal::new(3000, 0), Decimal::new(4000, 0));
        assert_eq!(change.to_string(), "-25.0");
    }
}
