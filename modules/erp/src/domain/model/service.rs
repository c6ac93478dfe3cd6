use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::amc::AmcContract;
use super::complaint::Complaint;
use super::customer::Customer;
use super::refs::{CustomerRef, ServiceRef};

/// A purifier unit installed at a customer site.
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledService {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub service_type: String,
    pub installation_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl InstalledService {
    pub fn to_ref(&self) -> ServiceRef {
        ServiceRef {
            id: self.id,
            service_type: self.service_type.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewInstalledService {
    pub customer_id: Uuid,
    pub service_type: String,
    pub installation_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct InstalledServicePatch {
    pub service_type: Option<String>,
    pub installation_date: Option<DateTime<Utc>>,
}

impl InstalledServicePatch {
    pub fn is_empty(&self) -> bool {
        self.service_type.is_none() && self.installation_date.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServiceCounts {
    pub amcs: u64,
    pub complaints: u64,
}

/// List row: the service plus owning customer and reference counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceWithCustomer {
    pub service: InstalledService,
    pub customer: CustomerRef,
    pub counts: ServiceCounts,
}

#[derive(Debug, Clone)]
pub struct ServiceDetail {
    pub service: InstalledService,
    pub customer: Customer,
    pub contracts: Vec<AmcContract>,
    pub complaints: Vec<Complaint>,
}
