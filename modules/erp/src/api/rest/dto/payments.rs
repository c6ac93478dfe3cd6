use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::model::{
    CustomerRef, FinanceKind, FinanceLog, NewPayment, Payment, PaymentDetail, PaymentMode,
    PaymentPatch, PaymentStats, PaymentStatus, PaymentWithRefs, RecentPayment,
};

use super::amc::{AmcRefDto, AmcWithServiceDto};
use super::customers::{CustomerBriefDto, CustomerDto, CustomerNameDto, CustomerRefDto};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amc_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub payment_date: Option<DateTime<Utc>>,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            customer_id: p.customer_id,
            amc_id: p.amc_id,
            amount: p.amount,
            payment_mode: p.payment_mode,
            payment_date: p.payment_date,
            status: p.status,
            created_at: p.created_at,
        }
    }
}

/// Ledger entry; the wire keeps the original `type` key for the direction.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinanceLogDto {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: FinanceKind,
    pub payment_id: Uuid,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl From<FinanceLog> for FinanceLogDto {
    fn from(l: FinanceLog) -> Self {
        Self {
            id: l.id,
            kind: l.kind,
            payment_id: l.payment_id,
            amount: l.amount,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentListItemDto {
    #[serde(flatten)]
    pub payment: PaymentDto,
    pub customer: CustomerRefDto,
    pub amc: Option<AmcRefDto>,
}

impl From<PaymentWithRefs> for PaymentListItemDto {
    fn from(row: PaymentWithRefs) -> Self {
        Self {
            payment: row.payment.into(),
            customer: row.customer.into(),
            amc: row.amc.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaymentCreatedDto {
    #[serde(flatten)]
    pub payment: PaymentDto,
    pub customer: CustomerBriefDto,
}

impl From<(Payment, CustomerRef)> for PaymentCreatedDto {
    fn from((payment, customer): (Payment, CustomerRef)) -> Self {
        Self {
            payment: payment.into(),
            customer: customer.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailDto {
    #[serde(flatten)]
    pub payment: PaymentDto,
    pub customer: CustomerDto,
    pub amc: Option<AmcWithServiceDto>,
    pub finance_log: Option<FinanceLogDto>,
}

impl From<PaymentDetail> for PaymentDetailDto {
    fn from(d: PaymentDetail) -> Self {
        Self {
            payment: d.payment.into(),
            customer: d.customer.into(),
            amc: d.amc.map(Into::into),
            finance_log: d.finance_log.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentPaymentDto {
    #[serde(flatten)]
    pub payment: PaymentDto,
    pub customer: CustomerNameDto,
}

impl From<RecentPayment> for RecentPaymentDto {
    fn from(row: RecentPayment) -> Self {
        Self {
            payment: row.payment.into(),
            customer: CustomerNameDto {
                name: row.customer_name,
            },
        }
    }
}

/// `GET /payments/stats` body.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatsDto {
    pub total_revenue: Decimal,
    pub monthly_revenue: Decimal,
    pub percent_change: Decimal,
    pub pending_amount: Decimal,
    pub pending_count: u64,
    pub failed_amount: Decimal,
    pub failed_count: u64,
    pub recent_payments: Vec<RecentPaymentDto>,
}

impl From<PaymentStats> for PaymentStatsDto {
    fn from(s: PaymentStats) -> Self {
        Self {
            total_revenue: s.total_revenue,
            monthly_revenue: s.monthly_revenue,
            percent_change: s.percent_change,
            pending_amount: s.pending_amount,
            pending_count: s.pending_count,
            failed_amount: s.failed_amount,
            failed_count: s.failed_count,
            recent_payments: s.recent_payments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub customer_id: Uuid,
    pub amc_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_mode: PaymentMode,
    pub payment_date: Option<DateTime<Utc>>,
}

impl From<CreatePaymentRequest> for NewPayment {
    fn from(req: CreatePaymentRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            amc_id: req.amc_id,
            amount: req.amount,
            payment_mode: req.payment_mode,
            payment_date: req.payment_date,
        }
    }
}

/// Update body: the status is mandatory, the date optional.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentRequest {
    pub status: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
}

impl From<UpdatePaymentRequest> for PaymentPatch {
    fn from(req: UpdatePaymentRequest) -> Self {
        Self {
            status: req.status,
            payment_date: req.payment_date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PaymentListParams {
    pub status: Option<PaymentStatus>,
    pub customer_id: Option<Uuid>,
}
