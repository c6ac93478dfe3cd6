use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::amc::AmcWithService;
use super::finance::FinanceLog;
use super::refs::{AmcRef, CustomerRef};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "PAID")]
    Paid,
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "FAILED")]
    Failed,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    #[sea_orm(string_value = "CASH")]
    Cash,
    #[sea_orm(string_value = "UPI")]
    Upi,
    #[sea_orm(string_value = "CARD")]
    Card,
    #[sea_orm(string_value = "BANK_TRANSFER")]
    BankTransfer,
    #[sea_orm(string_value = "CHEQUE")]
    Cheque,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amc_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub payment_date: Option<DateTime<Utc>>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Creation input. Status is always recorded as [`PaymentStatus::Paid`] and
/// an income ledger entry is written in the same transaction.
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub customer_id: Uuid,
    pub amc_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    /// Defaults to the current instant when omitted.
    pub payment_date: Option<DateTime<Utc>>,
}

/// Update input: status is mandatory, the date optional.
#[derive(Debug, Clone)]
pub struct PaymentPatch {
    pub status: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
}

/// Filters accepted by the payment list endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentListQuery {
    pub status: Option<PaymentStatus>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentWithRefs {
    pub payment: Payment,
    pub customer: CustomerRef,
    pub amc: Option<AmcRef>,
}

#[derive(Debug, Clone)]
pub struct PaymentDetail {
    pub payment: Payment,
    pub customer: super::Customer,
    pub amc: Option<AmcWithService>,
    pub finance_log: Option<FinanceLog>,
}

/// A payment with just the payer's name, for recent-activity strips.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentPayment {
    pub payment: Payment,
    pub customer_name: String,
}

/// Finance KPIs for `GET /payments/stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentStats {
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
    /// Month-over-month revenue change, one decimal place; zero when the
    /// previous month had no revenue.
    pub percent_change: Decimal,
    pub pending_amount: Decimal,
    pub pending_count: u64,
    pub failed_amount: Decimal,
    pub failed_count: u64,
    pub recent_payments: Vec<RecentPayment>,
}
