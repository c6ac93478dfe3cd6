use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::model::{
    AmcContract, AmcDetail, AmcPatch, AmcRef, AmcStatus, AmcWithRefs, AmcWithService,
    NewAmcContract,
};

use super::customers::{CustomerBriefDto, CustomerDto, CustomerRefDto};
use super::payments::PaymentDto;
use super::services::{ServiceDto, ServiceRefDto};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmcDto {
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

impl From<AmcContract> for AmcDto {
    fn from(c: AmcContract) -> Self {
        Self {
            id: c.id,
            customer_id: c.customer_id,
            service_id: c.service_id,
            start_date: c.start_date,
            end_date: c.end_date,
            renewal_date: c.renewal_date,
            amount: c.amount,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

/// `{id, status}` projection embedded in payment rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmcRefDto {
    pub id: Uuid,
    pub status: AmcStatus,
}

impl From<AmcRef> for AmcRefDto {
    fn from(r: AmcRef) -> Self {
        Self {
            id: r.id,
            status: r.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmcListItemDto {
    #[serde(flatten)]
    pub contract: AmcDto,
    pub customer: CustomerRefDto,
    pub service: ServiceRefDto,
}

impl From<AmcWithRefs> for AmcListItemDto {
    fn from(row: AmcWithRefs) -> Self {
        Self {
            contract: row.contract.into(),
            customer: row.customer.into(),
            service: row.service.into(),
        }
    }
}

/// Contract plus its service projection, embedded in customer and payment
/// detail views.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmcWithServiceDto {
    #[serde(flatten)]
    pub contract: AmcDto,
    pub service: ServiceRefDto,
}

impl From<AmcWithService> for AmcWithServiceDto {
    fn from(row: AmcWithService) -> Self {
        Self {
            contract: row.contract.into(),
            service: row.service.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmcCreatedDto {
    #[serde(flatten)]
    pub contract: AmcDto,
    pub customer: CustomerBriefDto,
    pub service: ServiceRefDto,
}

impl From<AmcWithRefs> for AmcCreatedDto {
    fn from(row: AmcWithRefs) -> Self {
        Self {
            contract: row.contract.into(),
            customer: row.customer.into(),
            service: row.service.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmcDetailDto {
    #[serde(flatten)]
    pub contract: AmcDto,
    pub customer: CustomerDto,
    pub service: ServiceDto,
    pub payments: Vec<PaymentDto>,
}

impl From<AmcDetail> for AmcDetailDto {
    fn from(d: AmcDetail) -> Self {
        Self {
            contract: d.contract.into(),
            customer: d.customer.into(),
            service: d.service.into(),
            payments: d.payments.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AmcRenewedResponse {
    pub message: String,
    pub contract: AmcListItemDto,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAmcRequest {
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub renewal_date: DateTime<Utc>,
    pub amount: Decimal,
}

impl From<CreateAmcRequest> for NewAmcContract {
    fn from(req: CreateAmcRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            service_id: req.service_id,
            start_date: req.start_date,
            end_date: req.end_date,
            renewal_date: req.renewal_date,
            amount: req.amount,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAmcRequest {
    pub end_date: Option<DateTime<Utc>>,
    pub renewal_date: Option<DateTime<Utc>>,
    pub amount: Option<Decimal>,
    pub status: Option<AmcStatus>,
}

impl From<UpdateAmcRequest> for AmcPatch {
    fn from(req: UpdateAmcRequest) -> Self {
        Self {
            end_date: req.end_date,
            renewal_date: req.renewal_date,
            amount: req.amount,
            status: req.status,
        }
    }
}

/// Renewal body; the whole body may be omitted, in which case the default
/// of twelve months applies.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
pub struct RenewAmcRequest {
    pub months: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AmcListParams {
    pub status: Option<AmcStatus>,
    pub customer_id: Option<Uuid>,
}
