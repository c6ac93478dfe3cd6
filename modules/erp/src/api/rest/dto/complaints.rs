use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::model::{
    Complaint, ComplaintDetail, ComplaintPatch, ComplaintStatus, ComplaintWithRefs, NewComplaint,
    TechnicianRef,
};

use super::customers::{CustomerBriefDto, CustomerDto, CustomerRefDto};
use super::services::{ServiceDto, ServiceRefDto};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub description: String,
    pub status: ComplaintStatus,
    pub technician_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<Complaint> for ComplaintDto {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            customer_id: c.customer_id,
            service_id: c.service_id,
            description: c.description,
            status: c.status,
            technician_id: c.technician_id,
            created_at: c.created_at,
        }
    }
}

/// `{id, name}` technician projection for list rows and assign responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TechnicianBriefDto {
    pub id: Uuid,
    pub name: String,
}

impl From<TechnicianRef> for TechnicianBriefDto {
    fn from(r: TechnicianRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// `{id, name, email}` technician projection for the detail view.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TechnicianRefDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<TechnicianRef> for TechnicianRefDto {
    fn from(r: TechnicianRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
            email: r.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintListItemDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub customer: CustomerRefDto,
    pub service: ServiceRefDto,
    pub technician: Option<TechnicianBriefDto>,
}

impl From<ComplaintWithRefs> for ComplaintListItemDto {
    fn from(row: ComplaintWithRefs) -> Self {
        Self {
            complaint: row.complaint.into(),
            customer: row.customer.into(),
            service: row.service.into(),
            technician: row.technician.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintCreatedDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub customer: CustomerBriefDto,
    pub service: ServiceRefDto,
}

impl From<ComplaintWithRefs> for ComplaintCreatedDto {
    fn from(row: ComplaintWithRefs) -> Self {
        Self {
            complaint: row.complaint.into(),
            customer: row.customer.into(),
            service: row.service.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintUpdatedDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub customer: CustomerBriefDto,
}

impl From<ComplaintWithRefs> for ComplaintUpdatedDto {
    fn from(row: ComplaintWithRefs) -> Self {
        Self {
            complaint: row.complaint.into(),
            customer: row.customer.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintAssignedDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub customer: CustomerBriefDto,
    pub technician: Option<TechnicianBriefDto>,
}

impl From<ComplaintWithRefs> for ComplaintAssignedDto {
    fn from(row: ComplaintWithRefs) -> Self {
        Self {
            complaint: row.complaint.into(),
            customer: row.customer.into(),
            technician: row.technician.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ComplaintDetailDto {
    #[serde(flatten)]
    pub complaint: ComplaintDto,
    pub customer: CustomerDto,
    pub service: ServiceDto,
    pub technician: Option<TechnicianRefDto>,
}

impl From<ComplaintDetail> for ComplaintDetailDto {
    fn from(d: ComplaintDetail) -> Self {
        Self {
            complaint: d.complaint.into(),
            customer: d.customer.into(),
            service: d.service.into(),
            technician: d.technician.map(Into::into),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintRequest {
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub description: String,
}

impl From<CreateComplaintRequest> for NewComplaint {
    fn from(req: CreateComplaintRequest) -> Self {
        Self {
            customer_id: req.customer_id,
            service_id: req.service_id,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintRequest {
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
}

impl From<UpdateComplaintRequest> for ComplaintPatch {
    fn from(req: UpdateComplaintRequest) -> Self {
        Self {
            description: req.description,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignComplaintRequest {
    pub technician_id: Uuid,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintListParams {
    pub status: Option<ComplaintStatus>,
    pub customer_id: Option<Uuid>,
}
