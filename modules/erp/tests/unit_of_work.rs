//! Dependent writes commit with their primary row or not at all.
//!
//! Payment + ledger entry and complaint + notification each run inside one
//! transaction. These tests wire the services with a repository whose
//! dependent insert fails and assert that the primary row rolled back too.

use std::sync::Arc;

use async_trait::async_trait;
use aquaserve_auth::{Role, Session};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait};
use sea_orm_migration::MigratorTrait;
use uuid::Uuid;

use aquaserve_erp::domain::error::{DomainError, DomainResult};
use aquaserve_erp::domain::model::{
    Complaint, ComplaintStatus, Customer, FinanceLog, InstalledService, NewComplaint, NewPayment,
    Notification, NotificationListQuery, NotificationWithCustomer, PaymentMode, StaffUser,
};
use aquaserve_erp::domain::repos::{
    ComplaintsRepository, CustomersRepository, FinanceRepository, NotificationsRepository,
    ServicesRepository, UsersRepository,
};
use aquaserve_erp::domain::service::{ComplaintsService, PaymentsService};
use aquaserve_erp::infra::storage::entity::{complaint, finance, notification, payment};
use aquaserve_erp::infra::storage::migrations::Migrator;
use aquaserve_erp::infra::storage::repos::{
    SeaOrmAmcRepository, SeaOrmComplaintsRepository, SeaOrmCustomersRepository,
    SeaOrmNotificationsRepository, SeaOrmPaymentsRepository, SeaOrmServicesRepository,
    SeaOrmUsersRepository,
};

/// Ledger that refuses every append, as if the table were gone.
struct FailingFinanceRepo;

#[async_trait]
impl FinanceRepository for FailingFinanceRepo {
    async fn insert<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _log: FinanceLog,
    ) -> DomainResult<FinanceLog> {
        Err(DomainError::Database(DbErr::Custom(
            "ledger write refused".to_owned(),
        )))
    }

    async fn find_by_payment<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _payment_id: Uuid,
    ) -> DomainResult<Option<FinanceLog>> {
        Ok(None)
    }
}

/// Notification store that refuses every insert.
struct FailingNotificationsRepo;

#[async_trait]
impl NotificationsRepository for FailingNotificationsRepo {
    async fn list<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _query: &NotificationListQuery,
    ) -> DomainResult<Vec<NotificationWithCustomer>> {
        Ok(Vec::new())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        _runner: &C,
        _notification: Notification,
    ) -> DomainResult<Notification> {
        Err(DomainError::Database(DbErr::Custom(
            "notification write refused".to_owned(),
        )))
    }

    async fn mark_read<C: ConnectionTrait>(&self, _runner: &C, _ids: &[Uuid]) -> DomainResult<u64> {
        Ok(0)
    }
}

fn admin_session() -> Session {
    Session {
        user_id: Uuid::now_v7(),
        name: "Asha Verma".to_owned(),
        email: "asha@aquaserve.test".to_owned(),
        role: Role::Admin,
    }
}

async fn fresh_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn given_customer(db: &DatabaseConnection) -> Uuid {
    let customer = Customer {
        id: Uuid::now_v7(),
        name: "Rahul Sharma".to_owned(),
        phone: "+919876543210".to_owned(),
        email: None,
        address: "12, Lake View Road, Pune - 411001".to_owned(),
        created_at: Utc::now(),
    };
    let id = customer.id;
    SeaOrmCustomersRepository.insert(db, customer).await.unwrap();
    id
}

async fn given_service(db: &DatabaseConnection, customer_id: Uuid) -> Uuid {
    let service = InstalledService {
        id: Uuid::now_v7(),
        customer_id,
        service_type: "RO Water Purifier - Aquaguard".to_owned(),
        installation_date: Utc::now(),
        created_at: Utc::now(),
    };
    let id = service.id;
    SeaOrmServicesRepository.insert(db, service).await.unwrap();
    id
}

#[tokio::test]
async fn failed_ledger_write_rolls_the_payment_back() {
    let db = fresh_db().await;
    let customer_id = given_customer(&db).await;

    let svc = PaymentsService::new(
        db.clone(),
        Arc::new(SeaOrmPaymentsRepository),
        Arc::new(SeaOrmCustomersRepository),
        Arc::new(SeaOrmAmcRepository),
        Arc::new(FailingFinanceRepo),
    );

    let result = svc
        .create(
            &admin_session(),
            NewPayment {
                customer_id,
                amc_id: None,
                amount: Decimal::new(4500, 0),
                payment_mode: PaymentMode::Upi,
                payment_date: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Database(_))));

    // Neither row survives the failed transaction.
    assert_eq!(payment::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(finance::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn failed_notification_write_rolls_the_complaint_back() {
    let db = fresh_db().await;
    let customer_id = given_customer(&db).await;
    let service_id = given_service(&db, customer_id).await;

    let svc = ComplaintsService::new(
        db.clone(),
        Arc::new(SeaOrmComplaintsRepository),
        Arc::new(SeaOrmCustomersRepository),
        Arc::new(SeaOrmServicesRepository),
        Arc::new(SeaOrmUsersRepository),
        Arc::new(FailingNotificationsRepo),
    );

    let result = svc
        .create(
            &admin_session(),
            NewComplaint {
                customer_id,
                service_id,
                description: "Water flow dropped to a trickle overnight.".to_owned(),
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Database(_))));

    assert_eq!(complaint::Entity::find().count(&db).await.unwrap(), 0);
    assert_eq!(notification::Entity::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn failed_notification_write_rolls_the_assignment_back() {
    let db = fresh_db().await;
    let customer_id = given_customer(&db).await;
    let service_id = given_service(&db, customer_id).await;

    let technician_id = Uuid::now_v7();
    SeaOrmUsersRepository
        .insert(
            &db,
            StaffUser {
                id: technician_id,
                name: "Suresh Yadav".to_owned(),
                email: "suresh@aquaserve.test".to_owned(),
                role: Role::Technician,
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();

    let complaint_id = Uuid::now_v7();
    SeaOrmComplaintsRepository
        .insert(
            &db,
            Complaint {
                id: complaint_id,
                customer_id,
                service_id,
                description: "Filter cartridge leaking at the seam.".to_owned(),
                status: ComplaintStatus::Open,
                technician_id: None,
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();

    let svc = ComplaintsService::new(
        db.clone(),
        Arc::new(SeaOrmComplaintsRepository),
        Arc::new(SeaOrmCustomersRepository),
        Arc::new(SeaOrmServicesRepository),
        Arc::new(SeaOrmUsersRepository),
        Arc::new(FailingNotificationsRepo),
    );

    let result = svc.assign(&admin_session(), complaint_id, technician_id).await;
    assert!(matches!(result, Err(DomainError::Database(_))));

    // The complaint is back to how it was before the assignment.
    let row = SeaOrmComplaintsRepository
        .get(&db, complaint_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.technician_id, None);
    assert_eq!(row.status, ComplaintStatus::Open);
    assert_eq!(notification::Entity::find().count(&db).await.unwrap(), 0);
}
