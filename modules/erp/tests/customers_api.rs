//! Customer directory endpoints, end to end.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{
    delete, get, given_customer, given_service, id_of, post, put, send, test_app, ADMIN_TOKEN,
    SUPPORT_TOKEN, TECHNICIAN_TOKEN,
};

#[tokio::test]
async fn anonymous_requests_are_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app.router, "GET", "/customers", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized"}));

    let (status, body) = send(&app.router, "GET", "/customers", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"error": "Unauthorized"}));
}

#[tokio::test]
async fn create_then_get_round_trips_every_field() {
    let app = test_app().await;

    let (status, created) = post(
        &app.router,
        ADMIN_TOKEN,
        "/customers",
        json!({
            "name": "Rahul Sharma",
            "phone": "+919876543210",
            "email": "rahul.sharma@example.com",
            "address": "B-402, Galaxy Heights, Andheri West, Mumbai - 400053",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["name"], "Rahul Sharma");
    assert_eq!(created["phone"], "+919876543210");
    assert_eq!(created["email"], "rahul.sharma@example.com");
    assert!(created["createdAt"].is_string());

    let id = id_of(&created);
    let (status, detail) = get(&app.router, ADMIN_TOKEN, &format!("/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], created["name"]);
    assert_eq!(detail["phone"], created["phone"]);
    assert_eq!(detail["email"], created["email"]);
    assert_eq!(detail["address"], created["address"]);
    // No dependent records yet; the expansions are present but empty.
    assert_eq!(detail["services"], json!([]));
    assert_eq!(detail["amcs"], json!([]));
    assert_eq!(detail["payments"], json!([]));
    assert_eq!(detail["complaints"], json!([]));
}

#[tokio::test]
async fn create_reports_the_first_violated_rule() {
    let app = test_app().await;

    let cases = [
        (
            json!({"name": "R", "phone": "+919876543210", "address": "12, Lake View Road"}),
            "Name must be at least 2 characters",
        ),
        (
            json!({"name": "Rahul", "phone": "12345", "address": "12, Lake View Road"}),
            "Invalid phone number",
        ),
        (
            json!({"name": "Rahul", "phone": "+919876543210", "email": "not-an-email", "address": "12, Lake View Road"}),
            "Invalid email",
        ),
        (
            json!({"name": "Rahul", "phone": "+919876543210", "address": "abc"}),
            "Address must be at least 5 characters",
        ),
    ];
    for (body, message) in cases {
        let (status, error) = post(&app.router, ADMIN_TOKEN, "/customers", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], message);
    }
}

#[tokio::test]
async fn list_pagination_reports_ceiling_total_pages() {
    let app = test_app().await;
    for n in 0..5 {
        given_customer(&app.router, &format!("Customer {n}"), "+919876543210").await;
    }

    let (status, page) = get(&app.router, ADMIN_TOKEN, "/customers?page=2&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["data"].as_array().unwrap().len(), 2);
    assert_eq!(
        page["pagination"],
        json!({"page": 2, "limit": 2, "total": 5, "totalPages": 3})
    );

    let (_, last) = get(&app.router, ADMIN_TOKEN, "/customers?page=3&limit=2").await;
    assert_eq!(last["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_matches_name_case_insensitively_and_phone() {
    let app = test_app().await;
    given_customer(&app.router, "Rahul Sharma", "+919876543210").await;
    given_customer(&app.router, "Priya Patel", "+919898989898").await;

    let (_, page) = get(&app.router, ADMIN_TOKEN, "/customers?search=priya").await;
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["data"][0]["name"], "Priya Patel");

    let (_, page) = get(&app.router, ADMIN_TOKEN, "/customers?search=98765").await;
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["data"][0]["name"], "Rahul Sharma");
}

#[tokio::test]
async fn update_changes_only_the_sent_fields() {
    let app = test_app().await;
    let id = given_customer(&app.router, "Amit Kumar", "+917654321098").await;

    let (status, updated) = put(
        &app.router,
        SUPPORT_TOKEN,
        &format!("/customers/{id}"),
        json!({"phone": "+911112223334"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["phone"], "+911112223334");
    assert_eq!(updated["name"], "Amit Kumar");
}

#[tokio::test]
async fn writes_are_gated_by_role() {
    let app = test_app().await;
    let body = json!({
        "name": "Sneha Gupta",
        "phone": "+918765432109",
        "address": "C-20, Green Park Layout, Bangalore",
    });

    // SUPPORT may create, TECHNICIAN may not.
    let (status, _) = post(&app.router, SUPPORT_TOKEN, "/customers", body.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, error) = post(&app.router, TECHNICIAN_TOKEN, "/customers", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden: Insufficient permissions");
}

#[tokio::test]
async fn delete_is_admin_only_and_removes_the_row() {
    let app = test_app().await;
    let id = given_customer(&app.router, "Vikram Singh", "+919123456789").await;

    let (status, error) = delete(&app.router, SUPPORT_TOKEN, &format!("/customers/{id}")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden: Insufficient permissions");

    let (status, body) = delete(&app.router, ADMIN_TOKEN, &format!("/customers/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, error) = get(&app.router, ADMIN_TOKEN, &format!("/customers/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Customer not found");
}

#[tokio::test]
async fn delete_is_blocked_while_records_link_to_the_customer() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Rahul Sharma", "+919876543210").await;
    given_service(&app.router, customer, "RO Water Purifier - Aquaguard").await;

    let (status, error) = delete(&app.router, ADMIN_TOKEN, &format!("/customers/{customer}")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        error["error"],
        "Customer has linked records and cannot be deleted"
    );

    // The list row reports what is holding the deletion up.
    let (_, page) = get(&app.router, ADMIN_TOKEN, "/customers").await;
    assert_eq!(page["data"][0]["counts"]["services"], 1);
    assert_eq!(page["data"][0]["counts"]["amcs"], 0);
}
