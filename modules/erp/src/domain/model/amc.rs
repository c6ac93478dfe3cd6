use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::payment::Payment;
use super::refs::{CustomerRef, ServiceRef};

/// Lifecycle state of an annual maintenance contract.
///
/// Stored as the screaming-snake string, which is also the wire form.
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
pub enum AmcStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "EXPIRED")]
    Expired,
    #[sea_orm(string_value = "PENDING_PAYMENT")]
    PendingPayment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmcContract {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub renewal_date: DateTime<Utc>,
    pub amount: Decimal,
    pub status: AmcStatus,
    pub created_at: DateTime<Utc>,
}

/// Creation input. Status is always forced to [`AmcStatus::Active`].
#[derive(Debug, Clone)]
pub struct NewAmcContract {
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub renewal_date: DateTime<Utc>,
    pub amount: Decimal,
}

/// Partial update. The start date is immutable once the contract exists.
#[derive(Debug, Clone, Default)]
pub struct AmcPatch {
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub amount: Option<Decimal>,
    pub status: Option<AmcStatus>,
}

impl AmcPatch {
    pub fn is_empty(&self) -> bool {
        self.end_date.is_none()
            && self.renewal_date.is_none()
            && self.amount.is_none()
            && self.status.is_none()
    }
}

/// Dates written back by a renewal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmcRenewal {
    pub end_date: DateTime<Utc>,
    pub renewal_date: DateTime<Utc>,
}

/// Filters accepted by the contract list endpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmcListQuery {
    pub status: Option<AmcStatus>,
    pub customer_id: Option<Uuid>,
}

/// List row: contract plus customer and service projections.
#[derive(Debug, Clone, PartialEq)]
pub struct AmcWithRefs {
    pub contract: AmcContract,
    pub customer: CustomerRef,
    pub service: ServiceRef,
}

/// Contract with its service projection, embedded in customer details.
#[derive(Debug, Clone, PartialEq)]
pub struct AmcWithService {
    pub contract: AmcContract,
    pub service: ServiceRef,
}

#[derive(Debug, Clone)]
pub struct AmcDetail {
    pub contract: AmcContract,
    pub customer: super::Customer,
    pub service: super::InstalledService,
    pub payments: Vec<Payment>,
}
