//! Lightweight projections of related aggregates, embedded in list rows and
//! detail views instead of the full records.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRef {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRef {
    pub id: Uuid,
    pub service_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TechnicianRef {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmcRef {
    pub id: Uuid,
    pub status: super::AmcStatus,
}
