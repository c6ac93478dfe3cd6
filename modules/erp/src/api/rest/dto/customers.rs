use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::model::{
    Customer, CustomerCounts, CustomerDetail, CustomerPatch, CustomerRef, CustomerWithCounts,
    NewCustomer,
};

use super::amc::AmcWithServiceDto;
use super::complaints::ComplaintDto;
use super::payments::PaymentDto;
use super::services::ServiceDto;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            phone: c.phone,
            email: c.email,
            address: c.address,
            created_at: c.created_at,
        }
    }
}

/// `{id, name}` projection embedded in create responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerBriefDto {
    pub id: Uuid,
    pub name: String,
}

impl From<CustomerRef> for CustomerBriefDto {
    fn from(r: CustomerRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

/// `{id, name, phone}` projection embedded in list rows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerRefDto {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

impl From<CustomerRef> for CustomerRefDto {
    fn from(r: CustomerRef) -> Self {
        Self {
            id: r.id,
            name: r.name,
            phone: r.phone,
        }
    }
}

/// Name-only projection for the recent-activity strips.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerNameDto {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct CustomerCountsDto {
    pub services: u64,
    pub amcs: u64,
    pub complaints: u64,
}

impl From<CustomerCounts> for CustomerCountsDto {
    fn from(c: CustomerCounts) -> Self {
        Self {
            services: c.services,
            amcs: c.amcs,
            complaints: c.complaints,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerListItemDto {
    #[serde(flatten)]
    pub customer: CustomerDto,
    pub counts: CustomerCountsDto,
}

impl From<CustomerWithCounts> for CustomerListItemDto {
    fn from(row: CustomerWithCounts) -> Self {
        Self {
            customer: row.customer.into(),
            counts: row.counts.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerDetailDto {
    #[serde(flatten)]
    pub customer: CustomerDto,
    pub services: Vec<ServiceDto>,
    pub amcs: Vec<AmcWithServiceDto>,
    pub payments: Vec<PaymentDto>,
    pub complaints: Vec<ComplaintDto>,
}

impl From<CustomerDetail> for CustomerDetailDto {
    fn from(d: CustomerDetail) -> Self {
        Self {
            customer: d.customer.into(),
            services: d.services.into_iter().map(Into::into).collect(),
            amcs: d.contracts.into_iter().map(Into::into).collect(),
            payments: d.payments.into_iter().map(Into::into).collect(),
            complaints: d.complaints.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(req: CreateCustomerRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            email: req.email,
            address: req.address,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl From<UpdateCustomerRequest> for CustomerPatch {
    fn from(req: UpdateCustomerRequest) -> Self {
        Self {
            name: req.name,
            phone: req.phone,
            email: req.email,
            address: req.address,
        }
    }
}

/// Query-string filters for `GET /customers`; paging arrives separately.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerListParams {
    /// Substring match on name and email (case-insensitive) or phone.
    pub search: Option<String>,
}
