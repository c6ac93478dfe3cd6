//! Entity to domain model mappers.

use std::str::FromStr;

use sea_orm::ActiveValue::Set;

use crate::domain::model::{
    AmcContract, AmcPatch, Complaint, ComplaintPatch, Customer, CustomerPatch, FinanceLog,
    InstalledService, InstalledServicePatch, Notification, Payment, PaymentPatch, StaffUser,
};
use crate::domain::{DomainError, DomainResult};

use super::entity::{amc, complaint, customer, finance, notification, payment, service, user};

impl From<customer::Model> for Customer {
    fn from(e: customer::Model) -> Self {
        Self {
            id: e.id,
            name: e.name,
            phone: e.phone,
            email: e.email,
            address: e.address,
            created_at: e.created_at,
        }
    }
}

pub fn customer_to_active_model(c: &Customer) -> customer::ActiveModel {
    customer::ActiveModel {
        id: Set(c.id),
        name: Set(c.name.clone()),
        phone: Set(c.phone.clone()),
        email: Set(c.email.clone()),
        address: Set(c.address.clone()),
        created_at: Set(c.created_at),
    }
}

/// Build a partial active model carrying only the patched columns.
pub fn customer_patch_to_active_model(patch: &CustomerPatch) -> customer::ActiveModel {
    let mut am = customer::ActiveModel::default();
    if let Some(name) = &patch.name {
        am.name = Set(name.clone());
    }
    if let Some(phone) = &patch.phone {
        am.phone = Set(phone.clone());
    }
    if let Some(email) = &patch.email {
        am.email = Set(Some(email.clone()));
    }
    if let Some(address) = &patch.address {
        am.address = Set(address.clone());
    }
    am
}

impl From<service::Model> for InstalledService {
    fn from(e: service::Model) -> Self {
        Self {
            id: e.id,
            customer_id: e.customer_id,
            service_type: e.service_type,
            installation_date: e.installation_date,
            created_at: e.created_at,
        }
    }
}

pub fn service_to_active_model(s: &InstalledService) -> service::ActiveModel {
    service::ActiveModel {
        id: Set(s.id),
        customer_id: Set(s.customer_id),
        service_type: Set(s.service_type.clone()),
        installation_date: Set(s.installation_date),
        created_at: Set(s.created_at),
    }
}

pub fn service_patch_to_active_model(patch: &InstalledServicePatch) -> service::ActiveModel {
    let mut am = service::ActiveModel::default();
    if let Some(service_type) = &patch.service_type {
        am.service_type = Set(service_type.clone());
    }
    if let Some(installation_date) = patch.installation_date {
        am.installation_date = Set(installation_date);
    }
    am
}

impl From<amc::Model> for AmcContract {
    fn from(e: amc::Model) -> Self {
        Self {
            id: e.id,
            customer_id: e.customer_id,
            service_id: e.service_id,
            start_date: e.start_date,
            end_date: e.end_date,
            renewal_date: e.renewal_date,
            amount: e.amount,
            status: e.status,
            created_at: e.created_at,
        }
    }
}

pub fn amc_to_active_model(c: &AmcContract) -> amc::ActiveModel {
    amc::ActiveModel {
        id: Set(c.id),
        customer_id: Set(c.customer_id),
        service_id: Set(c.service_id),
        start_date: Set(c.start_date),
        end_date: Set(c.end_date),
        renewal_date: Set(c.renewal_date),
        amount: Set(c.amount),
        status: Set(c.status),
        created_at: Set(c.created_at),
    }
}

pub fn amc_patch_to_active_model(patch: &AmcPatch) -> amc::ActiveModel {
    let mut am = amc::ActiveModel::default();
    if let Some(end_date) = patch.end_date {
        am.end_date = Set(end_date);
    }
    if let Some(renewal_date) = patch.renewal_date {
        am.renewal_date = Set(renewal_date);
    }
    if let Some(amount) = patch.amount {
        am.amount = Set(amount);
    }
    if let Some(status) = patch.status {
        am.status = Set(status);
    }
    am
}

impl From<payment::Model> for Payment {
    fn from(e: payment::Model) -> Self {
        Self {
            id: e.id,
            customer_id: e.customer_id,
            amc_id: e.amc_id,
            amount: e.amount,
            payment_mode: e.payment_mode,
            payment_date: e.payment_date,
            status: e.status,
            created_at: e.created_at,
        }
    }
}

pub fn payment_to_active_model(p: &Payment) -> payment::ActiveModel {
    payment::ActiveModel {
        id: Set(p.id),
        customer_id: Set(p.customer_id),
        amc_id: Set(p.amc_id),
        amount: Set(p.amount),
        payment_mode: Set(p.payment_mode),
        payment_date: Set(p.payment_date),
        status: Set(p.status),
        created_at: Set(p.created_at),
    }
}

pub fn payment_patch_to_active_model(patch: &PaymentPatch) -> payment::ActiveModel {
    let mut am = payment::ActiveModel {
        status: Set(patch.status),
        ..Default::default()
    };
    if let Some(payment_date) = patch.payment_date {
        am.payment_date = Set(Some(payment_date));
    }
    am
}

impl From<complaint::Model> for Complaint {
    fn from(e: complaint::Model) -> Self {
        Self {
            id: e.id,
            customer_id: e.customer_id,
            service_id: e.service_id,
            description: e.description,
            status: e.status,
            technician_id: e.technician_id,
            created_at: e.created_at,
        }
    }
}

pub fn complaint_to_active_model(c: &Complaint) -> complaint::ActiveModel {
    complaint::ActiveModel {
        id: Set(c.id),
        customer_id: Set(c.customer_id),
        service_id: Set(c.service_id),
        description: Set(c.description.clone()),
        status: Set(c.status),
        technician_id: Set(c.technician_id),
        created_at: Set(c.created_at),
    }
}

pub fn complaint_patch_to_active_model(patch: &ComplaintPatch) -> complaint::ActiveModel {
    let mut am = complaint::ActiveModel::default();
    if let Some(description) = &patch.description {
        am.description = Set(description.clone());
    }
    if let Some(status) = patch.status {
        am.status = Set(status);
    }
    am
}

impl From<notification::Model> for Notification {
    fn from(e: notification::Model) -> Self {
        Self {
            id: e.id,
            customer_id: e.customer_id,
            kind: e.kind,
            message: e.message,
            is_read: e.is_read,
            created_at: e.created_at,
        }
    }
}

pub fn notification_to_active_model(n: &Notification) -> notification::ActiveModel {
    notification::ActiveModel {
        id: Set(n.id),
        customer_id: Set(n.customer_id),
        kind: Set(n.kind.clone()),
        message: Set(n.message.clone()),
        is_read: Set(n.is_read),
        created_at: Set(n.created_at),
    }
}

impl From<finance::Model> for FinanceLog {
    fn from(e: finance::Model) -> Self {
        Self {
            id: e.id,
            kind: e.kind,
            payment_id: e.payment_id,
            amount: e.amount,
            created_at: e.created_at,
        }
    }
}

pub fn finance_log_to_active_model(f: &FinanceLog) -> finance::ActiveModel {
    finance::ActiveModel {
        id: Set(f.id),
        kind: Set(f.kind),
        payment_id: Set(f.payment_id),
        amount: Set(f.amount),
        created_at: Set(f.created_at),
    }
}

/// Staff rows keep the role as its wire string; reject unknown values at
/// the boundary instead of letting them masquerade as a valid role.
pub fn staff_user_from_model(e: user::Model) -> DomainResult<StaffUser> {
    let role = aquaserve_auth::Role::from_str(&e.role)
        .map_err(|err| DomainError::invariant(err.to_string()))?;
    Ok(StaffUser {
        id: e.id,
        name: e.name,
        email: e.email,
        role,
        created_at: e.created_at,
    })
}

pub fn staff_user_to_active_model(u: &StaffUser) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id),
        name: Set(u.name.clone()),
        email: Set(u.email.clone()),
        role: Set(u.role.as_str().to_owned()),
        created_at: Set(u.created_at),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::ActiveValue;
    use uuid::Uuid;

    use super::*;
    use crate::domain::model::AmcStatus;

    #[test]
    fn customer_entity_maps_field_for_field() {
        let id = Uuid::now_v7();
        let now = Utc::now();
        let entity = customer::Model {
            id,
            name: "Rahul Sharma".to_owned(),
            phone: "+919876543210".to_owned(),
            email: None,
            address: "123 MG Road, Bangalore".to_owned(),
            created_at: now,
        };

        let customer: Customer = entity.into();

        assert_eq!(customer.id, id);
        assert_eq!(customer.name, "Rahul Sharma");
        assert_eq!(customer.email, None);
        assert_eq!(customer.created_at, now);
    }

    #[test]
    fn amc_patch_leaves_absent_columns_unset() {
        let patch = AmcPatch {
            end_date: None,
            renewal_date: None,
            amount: Some(Decimal::new(450_000, 2)),
            status: Some(AmcStatus::Expired),
        };

        let am = amc_patch_to_active_model(&patch);

        assert!(matches!(am.end_date, ActiveValue::NotSet));
        assert!(matches!(am.renewal_date, ActiveValue::NotSet));
        assert!(matches!(am.amount, ActiveValue::Set(_)));
        assert!(matches!(am.status, ActiveValue::Set(AmcStatus::Expired)));
    }

    #[test]
    fn staff_user_rejects_unknown_roles() {
        let entity = user::Model {
            id: Uuid::now_v7(),
            name: "Ravi Kumar".to_owned(),
            email: "ravi@aquaserve.example".to_owned(),
            role: "PLUMBER".to_owned(),
            created_at: Utc::now(),
        };

        let err = staff_user_from_model(entity).unwrap_err();
        assert!(matches!(err, DomainError::Invariant(_)));
    }

    #[test]
    fn staff_user_round_trips_the_role_string() {
        let entity = user::Model {
            id: Uuid::now_v7(),
            name: "Ravi Kumar".to_owned(),
            email: "ravi@aquaserve.example".to_owned(),
            role: "TECHNICIAN".to_owned(),
            created_at: Utc::now(),
        };

        let staff = staff_user_from_model(entity).unwrap();
        assert_eq!(staff.role, aquaserve_auth::Role::Technician);

        let am = staff_user_to_active_model(&staff);
        assert!(matches!(am.role, ActiveValue::Set(ref s) if s == "TECHNICIAN"));
    }
}
