use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::refs::{CustomerRef, ServiceRef, TechnicianRef};

/// Complaint workflow state. Any state may be written via update; the
/// assign operation always forces [`ComplaintStatus::InProgress`].
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
pub enum ComplaintStatus {
    #[sea_orm(string_value = "OPEN")]
    Open,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "RESOLVED")]
    Resolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Complaint {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub description: String,
    pub status: ComplaintStatus,
    pub technician_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComplaint {
    pub customer_id: Uuid,
    pub service_id: Uuid,
    pub description: String,
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintPatch {
    pub description: Option<String>,
    pub status: Option<ComplaintStatus>,
}

impl ComplaintPatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.status.is_none()
    }
}

/// Filters accepted by the complaint list endpoint. `technician_id` is not
/// caller-supplied; the service pins it for technician sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplaintListQuery {
    pub status: Option<ComplaintStatus>,
    pub customer_id: Option<Uuid>,
    pub technician_id: Option<Uuid>,
}

/// List row: complaint plus customer, service and technician projections.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintWithRefs {
    pub complaint: Complaint,
    pub customer: CustomerRef,
    pub service: ServiceRef,
    pub technician: Option<TechnicianRef>,
}

#[derive(Debug, Clone)]
pub struct ComplaintDetail {
    pub complaint: Complaint,
    pub customer: super::Customer,
    pub service: super::InstalledService,
    pub technician: Option<TechnicianRef>,
}
