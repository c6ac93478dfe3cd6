use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::amc::AmcWithService;
use super::complaint::Complaint;
use super::payment::Payment;
use super::refs::CustomerRef;
use super::service::InstalledService;

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn to_ref(&self) -> CustomerRef {
        CustomerRef {
            id: self.id,
            name: self.name.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Creation input. Field rules are enforced by `CustomersService`.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: String,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
    }
}

/// Filters accepted by the customer list endpoint.
#[derive(Debug, Clone, Default)]
pub struct CustomerListQuery {
    /// Case-insensitive match against name and email, plain contains on phone.
    pub search: Option<String>,
}

/// How many dependent records reference a customer, shown on list rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerCounts {
    pub services: u64,
    pub amcs: u64,
    pub complaints: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerWithCounts {
    pub customer: Customer,
    pub counts: CustomerCounts,
}

/// Full detail view: the customer with its recent related records.
#[derive(Debug, Clone)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub services: Vec<InstalledService>,
    pub contracts: Vec<AmcWithService>,
    pub payments: Vec<Payment>,
    pub complaints: Vec<Complaint>,
}
