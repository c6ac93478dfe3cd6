//! Shared harness for the REST integration tests.
//!
//! Each test gets its own in-memory SQLite database with migrations applied,
//! one staff account per role and a router whose static resolver maps one
//! bearer token to each of them. Requests go through the full stack: session
//! middleware, handlers, services, sea-orm repositories.
#![allow(dead_code)]

use aquaserve_auth::{Role, StaticSessionResolver, StaticTokenEntry};
use aquaserve_erp::domain::model::StaffUser;
use aquaserve_erp::domain::repos::UsersRepository;
use aquaserve_erp::infra::storage::migrations::Migrator;
use aquaserve_erp::infra::storage::repos::SeaOrmUsersRepository;
use aquaserve_erp::ErpModule;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt as _; // for `oneshot`
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const FINANCE_TOKEN: &str = "finance-token";
pub const SUPPORT_TOKEN: &str = "support-token";
pub const TECHNICIAN_TOKEN: &str = "technician-token";

pub const ADMIN_ID: Uuid = Uuid::from_u128(0xB001);
pub const FINANCE_ID: Uuid = Uuid::from_u128(0xB002);
pub const SUPPORT_ID: Uuid = Uuid::from_u128(0xB003);
pub const TECHNICIAN_ID: Uuid = Uuid::from_u128(0xB004);

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
}

/// Fresh database, staff accounts for all four roles, wired router.
pub async fn test_app() -> TestApp {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let staff = [
        (ADMIN_ID, "Asha Verma", "asha@aquaserve.test", Role::Admin),
        (FINANCE_ID, "Meera Nair", "meera@aquaserve.test", Role::Finance),
        (SUPPORT_ID, "Kiran Desai", "kiran@aquaserve.test", Role::Support),
        (
            TECHNICIAN_ID,
            "Suresh Yadav",
            "suresh@aquaserve.test",
            Role::Technician,
        ),
    ];
    let users = SeaOrmUsersRepository;
    for (id, name, email, role) in staff {
        users
            .insert(
                &db,
                StaffUser {
                    id,
                    name: name.to_owned(),
                    email: email.to_owned(),
                    role,
                    created_at: Utc::now(),
                },
            )
            .await
            .unwrap();
    }

    let resolver = StaticSessionResolver::new(
        staff
            .into_iter()
            .zip([ADMIN_TOKEN, FINANCE_TOKEN, SUPPORT_TOKEN, TECHNICIAN_TOKEN])
            .map(|((user_id, name, email, role), token)| StaticTokenEntry {
                token: token.to_owned(),
                user_id,
                name: name.to_owned(),
                email: email.to_owned(),
                role,
            })
            .collect(),
    )
    .into_shared();

    let router = ErpModule::new(db.clone()).router(resolver);
    TestApp { router, db }
}

/// One request through the router; the response body comes back as JSON.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, json)
}

pub async fn get(router: &Router, token: &str, uri: &str) -> (StatusCode, Value) {
    send(router, "GET", uri, Some(token), None).await
}

pub async fn post(router: &Router, token: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(token), Some(body)).await
}

pub async fn put(router: &Router, token: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "PUT", uri, Some(token), Some(body)).await
}

pub async fn patch(router: &Router, token: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "PATCH", uri, Some(token), Some(body)).await
}

pub async fn delete(router: &Router, token: &str, uri: &str) -> (StatusCode, Value) {
    send(router, "DELETE", uri, Some(token), None).await
}

/// Creates a customer as ADMIN and returns its id.
pub async fn given_customer(router: &Router, name: &str, phone: &str) -> Uuid {
    let (status, body) = post(
        router,
        ADMIN_TOKEN,
        "/customers",
        serde_json::json!({
            "name": name,
            "phone": phone,
            "email": null,
            "address": "12, Lake View Road, Pune - 411001",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "customer fixture: {body}");
    id_of(&body)
}

/// Installs a service for the customer and returns its id.
pub async fn given_service(router: &Router, customer_id: Uuid, service_type: &str) -> Uuid {
    let (status, body) = post(
        router,
        ADMIN_TOKEN,
        "/services",
        serde_json::json!({
            "customerId": customer_id,
            "serviceType": service_type,
            "installationDate": "2024-01-15T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "service fixture: {body}");
    id_of(&body)
}

/// Opens a contract running 2024-01-15 to 2025-01-15 and returns its id.
pub async fn given_contract(
    router: &Router,
    customer_id: Uuid,
    service_id: Uuid,
    amount: u64,
) -> Uuid {
    let (status, body) = post(
        router,
        ADMIN_TOKEN,
        "/amc",
        serde_json::json!({
            "customerId": customer_id,
            "serviceId": service_id,
            "startDate": "2024-01-15T00:00:00Z",
            "endDate": "2025-01-15T00:00:00Z",
            "renewalDate": "2024-12-16T00:00:00Z",
            "amount": amount,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "contract fixture: {body}");
    id_of(&body)
}

/// Files a complaint for the customer's service and returns its id.
pub async fn given_complaint(router: &Router, customer_id: Uuid, service_id: Uuid) -> Uuid {
    let (status, body) = post(
        router,
        ADMIN_TOKEN,
        "/complaints",
        serde_json::json!({
            "customerId": customer_id,
            "serviceId": service_id,
            "description": "Water flow dropped to a trickle overnight.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "complaint fixture: {body}");
    id_of(&body)
}

/// The `id` field of a response body, parsed.
pub fn id_of(body: &Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or_else(|| panic!("response has no id: {body}"))
}
