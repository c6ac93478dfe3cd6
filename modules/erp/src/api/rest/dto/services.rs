use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::model::{
    CustomerRef, InstalledService, InstalledServicePatch, NewInstalledService, ServiceCounts,
    ServiceDetail, ServiceRef, ServiceWithCustomer,
};

use super::amc::AmcDto;
use super::complaints::ComplaintDto;
use super::customers::{CustomerBriefDto, CustomerDto, CustomerRefDto};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_type: String,
    pub installation_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<InstalledService> for ServiceDto {
    fn from(s: InstalledService) -> Self {
        Self {
            id: s.id,
            customer_id: s.customer_id,
            service_type: s.service_type,
            installation_date: s.installation_date,
            created_at: s.created_at,
        }
    }
}

/// `{id, serviceType}` projection embedded in contract and complaint rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRefDto {
    pub id: Uuid,
    pub service_type: String,
}

impl From<ServiceRef> for ServiceRefDto {
    fn from(r: ServiceRef) -> Self {
        Self {
            id: r.id,
            service_type: r.service_type,
        }
    }
}

/// Type-only projection for the recent-activity strips.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTypeDto {
    pub service_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ServiceCountsDto {
    pub amcs: u64,
    pub complaints: u64,
}

impl From<ServiceCounts> for ServiceCountsDto {
    fn from(c: ServiceCounts) -> Self {
        Self {
            amcs: c.amcs,
            complaints: c.complaints,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceListItemDto {
    #[serde(flatten)]
    pub service: ServiceDto,
    pub customer: CustomerRefDto,
    pub counts: ServiceCountsDto,
}

impl From<ServiceWithCustomer> for ServiceListItemDto {
    fn from(row: ServiceWithCustomer) -> Self {
        Self {
            service: row.service.into(),
            customer: row.customer.into(),
            counts: row.counts.into(),
        }
    }
}

/// The service list is not paginated; fleets are small enough to render
/// whole. The rows still ship inside a `data` envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceListResponse {
    pub data: Vec<ServiceListItemDto>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceCreatedDto {
    #[serde(flatten)]
    pub service: ServiceDto,
    pub customer: CustomerBriefDto,
}

impl From<(InstalledService, CustomerRef)> for ServiceCreatedDto {
    fn from((service, customer): (InstalledService, CustomerRef)) -> Self {
        Self {
            service: service.into(),
            customer: customer.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceDetailDto {
    #[serde(flatten)]
    pub service: ServiceDto,
    pub customer: CustomerDto,
    pub amcs: Vec<AmcDto>,
    pub complaints: Vec<ComplaintDto>,
}

impl From<ServiceDetail> for ServiceDetailDto {
    fn from(d: ServiceDetail) -> Self {
        Self {
            service: d.service.into(),
            customer: d.customer.into(),
            amcs: d.contracts.into_iter().map(Into::into).collect(),
            complaints: d.complaints.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub customer_id: Uuid,
    pub service_type: String,
    pub installation_date: DateTime<Utc>,
}

impl From<CreateServiceRequest> for NewInstalledService {
    fn from(req: CreateServiceRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            service_type: req.service_type,
            installation_date: req.installation_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    pub service_type: Option<String>,
    pub installation_date: Option<DateTime<Utc>>,
}

impl From<UpdateServiceRequest> for InstalledServicePatch {
    fn from(req: UpdateServiceRequest) -> Self {
        Self {
            service_type: req.service_type,
            installation_date: req.installation_date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListParams {
    pub customer_id: Option<Uuid>,
}
