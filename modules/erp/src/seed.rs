//! Demo dataset for local runs and manual testing.
//!
//! Staff accounts are matched by email and kept across runs. Everything
//! else is wiped and refilled, so reseeding always restores the same
//! picture: five customers, five installed services, four contracts in
//! mixed states, payments in every status the dashboard charts, and a
//! couple of complaints with one technician mid-flight.

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::info;
use uuid::Uuid;

use aquaserve_auth::Role;

use crate::domain::DomainResult;
use crate::domain::model::{
    AmcContract, AmcStatus, Complaint, ComplaintStatus, Customer, InstalledService, Notification,
    Payment, PaymentMode, PaymentStatus, StaffUser,
};
use crate::domain::repos::UsersRepository;
use crate::domain::service::time::RENEWAL_NOTICE_DAYS;
use crate::infra::storage::entity::{
    AmcEntity, ComplaintEntity, CustomerEntity, FinanceLogEntity, NotificationEntity,
    PaymentEntity, ServiceEntity,
};
use crate::infra::storage::mapper;
use crate::infra::storage::repos::SeaOrmUsersRepository;

/// Stable ids for the seeded staff accounts, so static token entries in an
/// example config can point at them.
pub const ADMIN_USER_ID: Uuid = Uuid::from_u128(0xA001);
pub const TECHNICIAN_USER_ID: Uuid = Uuid::from_u128(0xA002);

/// Reset the demo dataset.
///
/// Idempotent in the useful sense: staff accounts survive (matched by
/// email), customer-facing tables are rebuilt from scratch.
pub async fn run(db: &DatabaseConnection) -> DomainResult<()> {
    let now = Utc::now();

    ensure_staff_user(
        db,
        StaffUser {
            id: ADMIN_USER_ID,
            name: "Test Admin".to_owned(),
            email: "test@test.com".to_owned(),
            role: Role::Admin,
            created_at: now,
        },
    )
    .await?;
    let technician = ensure_staff_user(
        db,
        StaffUser {
            id: TECHNICIAN_USER_ID,
            name: "Suresh Yadav".to_owned(),
            email: "suresh@test.com".to_owned(),
            role: Role::Technician,
            created_at: now,
        },
    )
    .await?;

    // Children before parents, per the foreign keys.
    NotificationEntity::delete_many().exec(db).await?;
    ComplaintEntity::delete_many().exec(db).await?;
    FinanceLogEntity::delete_many().exec(db).await?;
    PaymentEntity::delete_many().exec(db).await?;
    AmcEntity::delete_many().exec(db).await?;
    ServiceEntity::delete_many().exec(db).await?;
    CustomerEntity::delete_many().exec(db).await?;

    let customers = seed_customers(db, now).await?;
    let services = seed_services(db, &customers, now).await?;
    let contracts = seed_contracts(db, &customers, &services, now).await?;
    seed_payments(db, &customers, &contracts, now).await?;
    seed_complaints(db, &customers, &services, technician.id, now).await?;
    seed_notifications(db, &customers, now).await?;

    info!("demo dataset ready");
    Ok(())
}

async fn ensure_staff_user(db: &DatabaseConnection, user: StaffUser) -> DomainResult<StaffUser> {
    let users = SeaOrmUsersRepository;
    if let Some(existing) = users.find_by_email(db, &user.email).await? {
        return Ok(existing);
    }
    info!(email = %user.email, role = user.role.as_str(), "seeding staff account");
    users.insert(db, user).await
}

async fn seed_customers(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> DomainResult<Vec<Customer>> {
    let rows = [
        (
            "Rahul Sharma",
            "+919876543210",
            "rahul.sharma@example.com",
            "B-402, Galaxy Heights, Andheri West, Mumbai - 400053",
        ),
        (
            "Priya Patel",
            "+919898989898",
            "priya.p@example.com",
            "12, Ambika Bunglows, Satellite, Ahmedabad - 380015",
        ),
        (
            "Amit Kumar",
            "+917654321098",
            "amit.k@example.com",
            "Flat 101, Shanti Niketan, Dwarka Sector 7, Delhi - 110077",
        ),
        (
            "Sneha Gupta",
            "+918765432109",
            "sneha.g@example.com",
            "C-20, Green Park Layout, Koramangala, Bangalore - 560034",
        ),
        (
            "Vikram Singh",
            "+919123456789",
            "vikram.s@example.com",
            "45, Model Town, Ludhiana, Punjab - 141002",
        ),
    ];

    let customers: Vec<Customer> = rows
        .into_iter()
        .map(|(name, phone, email, address)| Customer {
            id: Uuid::now_v7(),
            name: name.to_owned(),
            phone: phone.to_owned(),
            email: Some(email.to_owned()),
            address: address.to_owned(),
            created_at: now,
        })
        .collect();

    CustomerEntity::insert_many(customers.iter().map(mapper::customer_to_active_model))
        .exec(db)
        .await?;
    info!(count = customers.len(), "seeded customers");
    Ok(customers)
}

async fn seed_services(
    db: &DatabaseConnection,
    customers: &[Customer],
    now: DateTime<Utc>,
) -> DomainResult<Vec<InstalledService>> {
    let rows = [
        (0usize, "RO Water Purifier - Aquaguard", fixed_date(2024, 1, 15)),
        (0, "UV Water Filter", fixed_date(2024, 2, 20)),
        (1, "RO Water Purifier - Kent", fixed_date(2023, 12, 10)),
        (2, "Industrial RO Plant", fixed_date(2023, 11, 5)),
        (3, "RO Water Purifier - Livpure", fixed_date(2024, 2, 1)),
    ];

    let services: Vec<InstalledService> = rows
        .into_iter()
        .map(|(customer, service_type, installed)| InstalledService {
            id: Uuid::now_v7(),
            customer_id: customers[customer].id,
            service_type: service_type.to_owned(),
            installation_date: installed,
            created_at: now,
        })
        .collect();

    ServiceEntity::insert_many(services.iter().map(mapper::service_to_active_model))
        .exec(db)
        .await?;
    info!(count = services.len(), "seeded services");
    Ok(services)
}

async fn seed_contracts(
    db: &DatabaseConnection,
    customers: &[Customer],
    services: &[InstalledService],
    now: DateTime<Utc>,
) -> DomainResult<Vec<AmcContract>> {
    let notice = Duration::days(RENEWAL_NOTICE_DAYS);
    let one_year_out = now.checked_add_months(Months::new(12)).unwrap_or(now);
    let three_months_out = now.checked_add_months(Months::new(3)).unwrap_or(now);
    let one_month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);

    let rows = [
        // One contract well inside its term, one nearing its end, one
        // already lapsed, one fresh. Enough to light up every dashboard
        // bucket.
        (
            0usize,
            0usize,
            fixed_date(2024, 1, 15),
            one_year_out,
            one_year_out - notice,
            4_500,
            AmcStatus::Active,
        ),
        (
            1,
            2,
            fixed_date(2023, 12, 10),
            three_months_out,
            three_months_out - notice,
            3_200,
            AmcStatus::Active,
        ),
        (
            2,
            3,
            fixed_date(2023, 11, 5),
            one_month_ago,
            one_month_ago,
            12_000,
            AmcStatus::Expired,
        ),
        (
            3,
            4,
            fixed_date(2024, 2, 1),
            one_year_out,
            one_year_out - notice,
            2_800,
            AmcStatus::Active,
        ),
    ];

    let contracts: Vec<AmcContract> = rows
        .into_iter()
        .map(
            |(customer, service, start, end, renewal, amount, status)| AmcContract {
                id: Uuid::now_v7(),
                customer_id: customers[customer].id,
                service_id: services[service].id,
                start_date: start,
                end_date: end,
                renewal_date: renewal,
                amount: Decimal::from(amount),
                status,
                created_at: now,
            },
        )
        .collect();

    AmcEntity::insert_many(contracts.iter().map(mapper::amc_to_active_model))
        .exec(db)
        .await?;
    info!(count = contracts.len(), "seeded AMC contracts");
    Ok(contracts)
}

async fn seed_payments(
    db: &DatabaseConnection,
    customers: &[Customer],
    contracts: &[AmcContract],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    let rows = [
        (
            0usize,
            Some(0usize),
            4_500,
            PaymentMode::Upi,
            Some(fixed_date(2024, 1, 15)),
            PaymentStatus::Paid,
        ),
        (
            1,
            Some(1),
            3_200,
            PaymentMode::Cash,
            None,
            PaymentStatus::Pending,
        ),
        (
            2,
            Some(2),
            12_000,
            PaymentMode::BankTransfer,
            Some(fixed_date(2023, 11, 5)),
            PaymentStatus::Paid,
        ),
        (
            3,
            Some(3),
            2_800,
            PaymentMode::Card,
            Some(fixed_date(2024, 2, 1)),
            PaymentStatus::Paid,
        ),
        // A walk-in service charge with no contract behind it; dated now so
        // the current month always has revenue.
        (4, None, 1_500, PaymentMode::Upi, Some(now), PaymentStatus::Paid),
    ];

    let payments: Vec<Payment> = rows
        .into_iter()
        .map(|(customer, contract, amount, mode, date, status)| Payment {
            id: Uuid::now_v7(),
            customer_id: customers[customer].id,
            amc_id: contract.map(|i| contracts[i].id),
            amount: Decimal::from(amount),
            payment_mode: mode,
            payment_date: date,
            status,
            created_at: now,
        })
        .collect();

    PaymentEntity::insert_many(payments.iter().map(mapper::payment_to_active_model))
        .exec(db)
        .await?;
    info!(count = payments.len(), "seeded payments");
    Ok(())
}

async fn seed_complaints(
    db: &DatabaseConnection,
    customers: &[Customer],
    services: &[InstalledService],
    technician_id: Uuid,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    let rows = [
        (
            0usize,
            0usize,
            "Water flow is very slow since yesterday morning. Need urgent service.",
            ComplaintStatus::Open,
            None,
        ),
        (
            1,
            2,
            "Regular filter cleanup and maintenance due.",
            ComplaintStatus::InProgress,
            Some(technician_id),
        ),
        (
            2,
            3,
            "Water leaking from the bottom unit. Fixed successfully.",
            ComplaintStatus::Resolved,
            Some(technician_id),
        ),
    ];

    let complaints: Vec<Complaint> = rows
        .into_iter()
        .map(|(customer, service, description, status, technician)| Complaint {
            id: Uuid::now_v7(),
            customer_id: customers[customer].id,
            service_id: services[service].id,
            description: description.to_owned(),
            status,
            technician_id: technician,
            created_at: now,
        })
        .collect();

    ComplaintEntity::insert_many(complaints.iter().map(mapper::complaint_to_active_model))
        .exec(db)
        .await?;
    info!(count = complaints.len(), "seeded complaints");
    Ok(())
}

async fn seed_notifications(
    db: &DatabaseConnection,
    customers: &[Customer],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    let rows = [
        (
            0usize,
            "COMPLAINT_UPDATE",
            "Your complaint has been registered. Our team will contact you soon.",
        ),
        (
            1,
            "PAYMENT_DUE",
            "Payment of ₹3,200 is pending for your AMC contract.",
        ),
        (
            2,
            "AMC_RENEWAL",
            "Your AMC contract has expired. Renew now to continue services.",
        ),
    ];

    let notifications: Vec<Notification> = rows
        .into_iter()
        .map(|(customer, kind, message)| Notification {
            id: Uuid::now_v7(),
            customer_id: customers[customer].id,
            kind: kind.to_owned(),
            message: message.to_owned(),
            is_read: false,
            created_at: now,
        })
        .collect();

    NotificationEntity::insert_many(notifications.iter().map(mapper::notification_to_active_model))
        .exec(db)
        .await?;
    info!(count = notifications.len(), "seeded notifications");
    Ok(())
}

fn fixed_date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("seed dates are valid calendar dates")
}

#[cfg(test)]
mod tests {
    use sea_orm::{ColumnTrait, ConnectOptions, Database, QueryFilter};
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infra::storage::entity::{complaint, user};
    use crate::infra::storage::migrations::Migrator;

    async fn fresh_db() -> DatabaseConnection {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1);
        let db = Database::connect(opts).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    #[tokio::test]
    async fn reseeding_rebuilds_the_same_dataset() {
        let db = fresh_db().await;
        run(&db).await.unwrap();
        run(&db).await.unwrap();

        assert_eq!(CustomerEntity::find().all(&db).await.unwrap().len(), 5);
        assert_eq!(ServiceEntity::find().all(&db).await.unwrap().len(), 5);
        assert_eq!(AmcEntity::find().all(&db).await.unwrap().len(), 4);
        assert_eq!(PaymentEntity::find().all(&db).await.unwrap().len(), 5);
        assert_eq!(ComplaintEntity::find().all(&db).await.unwrap().len(), 3);
        assert_eq!(NotificationEntity::find().all(&db).await.unwrap().len(), 3);
        // Staff rows are kept, not duplicated.
        assert_eq!(user::Entity::find().all(&db).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn assigned_complaints_reference_the_seeded_technician() {
        let db = fresh_db().await;
        run(&db).await.unwrap();

        let assigned = complaint::Entity::find()
            .filter(complaint::Column::TechnicianId.eq(TECHNICIAN_USER_ID))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(assigned.len(), 2);

        let technician = user::Entity::find_by_id(TECHNICIAN_USER_ID)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(technician.role, "TECHNICIAN");
    }
}
