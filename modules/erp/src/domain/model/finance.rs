use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Ledger entry direction. Only income entries are produced today (one per
/// recorded payment); the expense side exists for the stored format.
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
pub enum FinanceKind {
    #[sea_orm(string_value = "INCOME")]
    Income,
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

/// Append-only ledger line tied to exactly one payment.
#[derive(Debug, Clone, PartialEq)]
pub struct FinanceLog {
    pub id: Uuid,
    pub kind: FinanceKind,
    pub payment_id: Uuid,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}
