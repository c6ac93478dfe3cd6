use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{
    Payment, PaymentDetail, PaymentListQuery, PaymentPatch, PaymentStatus, PaymentWithRefs,
    RecentPayment,
};

/// Persistence operations for payments.
#[async_trait]
pub trait PaymentsRepository: Send + Sync {
    /// Page of payments, newest first.
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &PaymentListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<PaymentWithRefs>>;

    async fn get<C: ConnectionTrait>(&self, runner: &C, id: Uuid)
    -> DomainResult<Option<Payment>>;

    /// Payment expanded with customer, contract and ledger entry.
    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<PaymentDetail>>;

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        payment: Payment,
    ) -> DomainResult<Payment>;

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &PaymentPatch,
    ) -> DomainResult<Option<Payment>>;

    /// Clears `amc_id` on every payment of the given contract; returns how
    /// many rows were touched.
    async fn detach_from_amc<C: ConnectionTrait>(
        &self,
        runner: &C,
        amc_id: Uuid,
    ) -> DomainResult<u64>;

    /// Sum of PAID amounts with `payment_date` inside `[from, to)`; open on
    /// either side when a bound is `None`.
    async fn sum_paid<C: ConnectionTrait>(
        &self,
        runner: &C,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Decimal>;

    /// Total amount and row count for one status.
    async fn status_totals<C: ConnectionTrait>(
        &self,
        runner: &C,
        status: PaymentStatus,
    ) -> DomainResult<(Decimal, u64)>;

    /// Most recent payments with the payer's name.
    async fn recent_with_customer<C: ConnectionTrait>(
        &self,
        runner: &C,
        limit: u64,
    ) -> DomainResult<Vec<RecentPayment>>;
}
