//! Installed-service endpoints, end to end.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{
    delete, get, given_complaint, given_contract, given_customer, given_service, id_of, post, put,
    test_app, ADMIN_TOKEN, TECHNICIAN_TOKEN,
};

#[tokio::test]
async fn create_requires_an_existing_customer() {
    let app = test_app().await;

    let (status, error) = post(
        &app.router,
        ADMIN_TOKEN,
        "/services",
        json!({
            "customerId": Uuid::nil(),
            "serviceType": "RO Water Purifier - Kent",
            "installationDate": "2024-01-15T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Customer not found");
}

#[tokio::test]
async fn create_then_get_carries_the_customer_projection() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Priya Patel", "+919898989898").await;

    let (status, created) = post(
        &app.router,
        ADMIN_TOKEN,
        "/services",
        json!({
            "customerId": customer,
            "serviceType": "UV Water Filter",
            "installationDate": "2024-02-20T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["serviceType"], "UV Water Filter");
    assert_eq!(created["customer"]["name"], "Priya Patel");

    let id = id_of(&created);
    let (status, detail) = get(&app.router, ADMIN_TOKEN, &format!("/services/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["installationDate"], "2024-02-20T00:00:00Z");
    assert_eq!(detail["customer"]["phone"], "+919898989898");
    assert_eq!(detail["amcs"], json!([]));
    assert_eq!(detail["complaints"], json!([]));
}

#[tokio::test]
async fn list_is_a_bare_data_envelope_with_counts() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Amit Kumar", "+917654321098").await;
    let service = given_service(&app.router, customer, "Industrial RO Plant").await;
    given_contract(&app.router, customer, service, 12_000).await;

    let (status, body) = get(&app.router, ADMIN_TOKEN, "/services").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("pagination").is_none(), "list is not paginated");
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["customer"]["name"], "Amit Kumar");
    assert_eq!(rows[0]["counts"], json!({"amcs": 1, "complaints": 0}));
}

#[tokio::test]
async fn list_filters_by_customer() {
    let app = test_app().await;
    let first = given_customer(&app.router, "Rahul Sharma", "+919876543210").await;
    let second = given_customer(&app.router, "Sneha Gupta", "+918765432109").await;
    given_service(&app.router, first, "RO Water Purifier - Aquaguard").await;
    given_service(&app.router, second, "RO Water Purifier - Livpure").await;

    let (_, body) = get(
        &app.router,
        ADMIN_TOKEN,
        &format!("/services?customerId={second}"),
    )
    .await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["serviceType"], "RO Water Purifier - Livpure");
}

#[tokio::test]
async fn update_rejects_a_blank_service_type() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Vikram Singh", "+919123456789").await;
    let service = given_service(&app.router, customer, "UV Water Filter").await;

    let (status, error) = put(
        &app.router,
        ADMIN_TOKEN,
        &format!("/services/{service}"),
        json!({"serviceType": "X"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Service type required");

    let (status, updated) = put(
        &app.router,
        ADMIN_TOKEN,
        &format!("/services/{service}"),
        json!({"serviceType": "UV Water Filter Pro"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["serviceType"], "UV Water Filter Pro");
}

#[tokio::test]
async fn delete_is_blocked_while_complaints_reference_the_service() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Priya Patel", "+919898989898").await;
    let service = given_service(&app.router, customer, "RO Water Purifier - Kent").await;
    given_complaint(&app.router, customer, service).await;

    let (status, error) = delete(&app.router, ADMIN_TOKEN, &format!("/services/{service}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        error["error"],
        "Service has linked records and cannot be deleted"
    );
}

#[tokio::test]
async fn delete_removes_an_unreferenced_service() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Amit Kumar", "+917654321098").await;
    let service = given_service(&app.router, customer, "UV Water Filter").await;

    let (status, body) = delete(&app.router, ADMIN_TOKEN, &format!("/services/{service}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, error) = get(&app.router, ADMIN_TOKEN, &format!("/services/{service}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Service not found");
}

#[tokio::test]
async fn technicians_cannot_install_services() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Sneha Gupta", "+918765432109").await;

    let (status, error) = post(
        &app.router,
        TECHNICIAN_TOKEN,
        "/services",
        json!({
            "customerId": customer,
            "serviceType": "RO Water Purifier - Livpure",
            "installationDate": "2024-02-01T00:00:00Z",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden: Insufficient permissions");
}
