//! Complaint workflow: registration, assignment, technician isolation and
//! the customer notifications each step leaves behind.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{
    get, given_complaint, given_customer, given_service, id_of, patch, post, put, test_app,
    ADMIN_ID, ADMIN_TOKEN, SUPPORT_TOKEN, TECHNICIAN_ID, TECHNICIAN_TOKEN,
};

async fn notifications_for(router: &axum::Router, customer: Uuid) -> Vec<Value> {
    let (status, body) = get(
        router,
        ADMIN_TOKEN,
        &format!("/notifications?customerId={customer}"),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body.as_array().expect("bare array").clone()
}

#[tokio::test]
async fn create_registers_open_and_notifies_the_customer() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Rahul Sharma", "+919876543210").await;
    let service = given_service(&app.router, customer, "RO Water Purifier - Aquaguard").await;

    let (status, created) = post(
        &app.router,
        SUPPORT_TOKEN,
        "/complaints",
        json!({
            "customerId": customer,
            "serviceId": service,
            "description": "Water flow is very slow since yesterday morning.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["technicianId"], json!(null));
    assert_eq!(created["customer"]["name"], "Rahul Sharma");
    assert_eq!(created["service"]["serviceType"], "RO Water Purifier - Aquaguard");

    let id = id_of(&created);
    let ticket = &id.to_string()[..8];
    let feed = notifications_for(&app.router, customer).await;
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0]["type"], "COMPLAINT_UPDATE");
    assert_eq!(
        feed[0]["message"],
        json!(format!(
            "Your complaint has been registered. Ticket ID: {ticket}"
        ))
    );
}

#[tokio::test]
async fn create_rejects_short_descriptions() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Priya Patel", "+919898989898").await;
    let service = given_service(&app.router, customer, "UV Water Filter").await;

    let (status, error) = post(
        &app.router,
        SUPPORT_TOKEN,
        "/complaints",
        json!({
            "customerId": customer,
            "serviceId": service,
            "description": "too short",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Description must be at least 10 characters");
    assert!(notifications_for(&app.router, customer).await.is_empty());
}

#[tokio::test]
async fn assign_forces_in_progress_and_notifies() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Amit Kumar", "+917654321098").await;
    let service = given_service(&app.router, customer, "Industrial RO Plant").await;
    let complaint = given_complaint(&app.router, customer, service).await;

    let (status, assigned) = post(
        &app.router,
        SUPPORT_TOKEN,
        &format!("/complaints/{complaint}/assign"),
        json!({"technicianId": TECHNICIAN_ID}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{assigned}");
    assert_eq!(assigned["status"], "IN_PROGRESS");
    assert_eq!(assigned["technician"]["name"], "Suresh Yadav");
    assert_eq!(assigned["technicianId"], json!(TECHNICIAN_ID.to_string()));

    let feed = notifications_for(&app.router, customer).await;
    // Registration plus assignment.
    assert_eq!(feed.len(), 2);
    assert_eq!(
        feed[0]["message"],
        "Technician Suresh Yadav has been assigned to your complaint."
    );
}

#[tokio::test]
async fn assign_accepts_only_technicians() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Sneha Gupta", "+918765432109").await;
    let service = given_service(&app.router, customer, "RO Water Purifier - Livpure").await;
    let complaint = given_complaint(&app.router, customer, service).await;

    for candidate in [ADMIN_ID, Uuid::nil()] {
        let (status, error) = post(
            &app.router,
            ADMIN_TOKEN,
            &format!("/complaints/{complaint}/assign"),
            json!({"technicianId": candidate}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Invalid technician");
    }
}

#[tokio::test]
async fn technicians_see_only_their_own_assignments() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Vikram Singh", "+919123456789").await;
    let service = given_service(&app.router, customer, "UV Water Filter").await;
    let mine = given_complaint(&app.router, customer, service).await;
    let foreign = given_complaint(&app.router, customer, service).await;

    post(
        &app.router,
        ADMIN_TOKEN,
        &format!("/complaints/{mine}/assign"),
        json!({"technicianId": TECHNICIAN_ID}),
    )
    .await;

    let (_, page) = get(&app.router, ADMIN_TOKEN, "/complaints").await;
    assert_eq!(page["pagination"]["total"], 2);

    let (_, page) = get(&app.router, TECHNICIAN_TOKEN, "/complaints").await;
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["data"][0]["id"], json!(mine.to_string()));

    let (status, error) = get(
        &app.router,
        TECHNICIAN_TOKEN,
        &format!("/complaints/{foreign}"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden");
}

#[tokio::test]
async fn technicians_may_update_status_but_not_description() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Rahul Sharma", "+919876543210").await;
    let service = given_service(&app.router, customer, "RO Water Purifier - Aquaguard").await;
    let complaint = given_complaint(&app.router, customer, service).await;
    post(
        &app.router,
        ADMIN_TOKEN,
        &format!("/complaints/{complaint}/assign"),
        json!({"technicianId": TECHNICIAN_ID}),
    )
    .await;

    let (status, error) = put(
        &app.router,
        TECHNICIAN_TOKEN,
        &format!("/complaints/{complaint}"),
        json!({"description": "Rewriting the customer's words entirely."}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Technicians can only update status");

    // The dashboard UI sends PATCH, the admin screens send PUT; both land
    // on the same handler.
    let (status, updated) = patch(
        &app.router,
        TECHNICIAN_TOKEN,
        &format!("/complaints/{complaint}"),
        json!({"status": "RESOLVED"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["status"], "RESOLVED");

    let feed = notifications_for(&app.router, customer).await;
    assert_eq!(
        feed[0]["message"],
        "Your complaint status updated to: RESOLVED"
    );
}

#[tokio::test]
async fn creation_is_gated_to_admin_and_support() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Priya Patel", "+919898989898").await;
    let service = given_service(&app.router, customer, "RO Water Purifier - Kent").await;

    let (status, error) = post(
        &app.router,
        TECHNICIAN_TOKEN,
        "/complaints",
        json!({
            "customerId": customer,
            "serviceId": service,
            "description": "Filter cartridge makes a rattling noise.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden: Insufficient permissions");
}
