use std::sync::Arc;

use aquaserve_auth::Session;
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use tracing::{debug, instrument};

use crate::domain::error::DomainResult;
use crate::domain::model::{AmcStatus, ComplaintStatus, DashboardStats, PaymentStatus};
use crate::domain::repos::{
    AmcRepository, ComplaintsRepository, CustomersRepository, PaymentsRepository,
};
use crate::domain::service::time;

const RECENT_ITEMS: u64 = 5;
const EXPIRY_WINDOW_DAYS: i64 = 30;

/// Read-only aggregator behind `GET /dashboard/stats`.
pub struct DashboardService<C, A, M, P>
where
    C: CustomersRepository,
    A: AmcRepository,
    M: ComplaintsRepository,
    P: PaymentsRepository,
{
    db: DatabaseConnection,
    customers: Arc<C>,
    amc: Arc<A>,
    complaints: Arc<M>,
    payments: Arc<P>,
}

impl<C, A, M, P> DashboardService<C, A, M, P>
where
    C: CustomersRepository,
    A: AmcRepository,
    M: ComplaintsRepository,
    P: PaymentsRepository,
{
    pub fn new(
        db: DatabaseConnection,
        customers: Arc<C>,
        amc: Arc<A>,
        complaints: Arc<M>,
        payments: Arc<P>,
    ) -> Self {
        Self {
            db,
            customers,
            amc,
            complaints,
            payments,
        }
    }

    /// All counters are independent reads; they fan out concurrently.
    #[instrument(skip(self, session), fields(user = %session.user_id))]
    pub async fn stats(&self, session: &Session) -> DomainResult<DashboardStats> {
        debug!("collecting dashboard stats");
        let now = Utc::now();
        let month_start = time::month_start(now);
        let expiry_horizon = now + Duration::days(EXPIRY_WINDOW_DAYS);

        let (
            customers_total,
            amc_counts,
            amc_expiring_soon,
            complaint_counts,
            monthly_revenue,
            pending,
            recent_complaints,
            recent_payments,
        ) = tokio::try_join!(
            self.customers.count_all(&self.db),
            self.amc.status_counts(&self.db),
            self.amc.count_active_expiring(&self.db, now, expiry_horizon),
            self.complaints.status_counts(&self.db),
            self.payments.sum_paid(&self.db, Some(month_start), None),
            self.payments.status_totals(&self.db, PaymentStatus::Pending),
            self.complaints.recent_with_refs(&self.db, RECENT_ITEMS),
            self.payments.recent_with_customer(&self.db, RECENT_ITEMS),
        )?;

        Ok(DashboardStats {
            customers_total,
            amc_active: count_of(&amc_counts, AmcStatus::Active),
            amc_expiring_soon,
            amc_expired: count_of(&amc_counts, AmcStatus::Expired),
            complaints_open: count_of(&complaint_counts, ComplaintStatus::Open),
            complaints_in_progress: count_of(&complaint_counts, ComplaintStatus::InProgress),
            monthly_revenue,
            pending_amount: pending.0,
            pending_count: pending.1,
            recent_complaints,
            recent_payments,
        })
    }
}

fn count_of<S: PartialEq + Copy>(counts: &[(S, u64)], status: S) -> u64 {
    counts
        .iter()
        .find(|(candidate, _)| *candidate == status)
        .map_or(0, |(_, count)| *count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_of_defaults_to_zero_for_absent_statuses() {
        let counts = vec![(AmcStatus::Active, 3), (AmcStatus::Expired, 1)];
        assert_eq!(count_of(&counts, AmcStatus::Active), 3);
        assert_eq!(count_of(&counts, AmcStatus::PendingPayment), 0);
    }
}
