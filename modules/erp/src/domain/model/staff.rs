use aquaserve_auth::Role;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A staff account. Credentials live with the external auth provider; this
/// record only drives authorization and technician assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
