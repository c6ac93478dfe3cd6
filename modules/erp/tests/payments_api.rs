//! Payment endpoints and the finance ledger coupling.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{
    get, given_customer, id_of, post, put, test_app, ADMIN_TOKEN, FINANCE_TOKEN, SUPPORT_TOKEN,
};

#[tokio::test]
async fn create_marks_paid_and_writes_the_income_log() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Rahul Sharma", "+919876543210").await;

    let (status, created) = post(
        &app.router,
        FINANCE_TOKEN,
        "/payments",
        json!({
            "customerId": customer,
            "amount": 4500,
            "paymentMode": "UPI",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["status"], "PAID");
    assert_eq!(created["amount"], json!(4500.0));
    assert!(created["paymentDate"].is_string(), "defaults to now");
    assert_eq!(created["customer"]["name"], "Rahul Sharma");

    let id = id_of(&created);
    let (status, detail) = get(&app.router, FINANCE_TOKEN, &format!("/payments/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let log = &detail["financeLog"];
    assert_eq!(log["type"], "INCOME");
    assert_eq!(log["amount"], json!(4500.0));
    assert_eq!(log["paymentId"], detail["id"]);
}

#[tokio::test]
async fn create_validates_amount_and_contract_reference() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Priya Patel", "+919898989898").await;

    let (status, error) = post(
        &app.router,
        ADMIN_TOKEN,
        "/payments",
        json!({"customerId": customer, "amount": -5, "paymentMode": "CASH"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Amount must be positive");

    let (status, error) = post(
        &app.router,
        ADMIN_TOKEN,
        "/payments",
        json!({
            "customerId": customer,
            "amcId": Uuid::nil(),
            "amount": 3200,
            "paymentMode": "CASH",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "AMC Contract not found");
}

#[tokio::test]
async fn update_changes_the_status() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Amit Kumar", "+917654321098").await;
    let (_, created) = post(
        &app.router,
        FINANCE_TOKEN,
        "/payments",
        json!({"customerId": customer, "amount": 3200, "paymentMode": "CASH"}),
    )
    .await;
    let id = id_of(&created);

    let (status, updated) = put(
        &app.router,
        FINANCE_TOKEN,
        &format!("/payments/{id}"),
        json!({"status": "PENDING"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["status"], "PENDING");
}

#[tokio::test]
async fn stats_split_paid_and_pending_buckets() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Sneha Gupta", "+918765432109").await;

    let (_, _paid) = post(
        &app.router,
        FINANCE_TOKEN,
        "/payments",
        json!({"customerId": customer, "amount": 4500, "paymentMode": "UPI"}),
    )
    .await;
    let (_, pending) = post(
        &app.router,
        FINANCE_TOKEN,
        "/payments",
        json!({"customerId": customer, "amount": 3200, "paymentMode": "CASH"}),
    )
    .await;
    let pending_id = id_of(&pending);
    let (status, _) = put(
        &app.router,
        FINANCE_TOKEN,
        &format!("/payments/{pending_id}"),
        json!({"status": "PENDING"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = get(&app.router, FINANCE_TOKEN, "/payments/stats").await;
    assert_eq!(status, StatusCode::OK, "{stats}");
    assert_eq!(stats["totalRevenue"], json!(4500.0));
    assert_eq!(stats["monthlyRevenue"], json!(4500.0));
    // No revenue last month, so the month-over-month change stays zero.
    assert_eq!(stats["percentChange"], json!(0.0));
    assert_eq!(stats["pendingAmount"], json!(3200.0));
    assert_eq!(stats["pendingCount"], 1);
    assert_eq!(stats["failedAmount"], json!(0.0));
    assert_eq!(stats["failedCount"], 0);
    assert_eq!(stats["recentPayments"].as_array().unwrap().len(), 2);
    assert_eq!(stats["recentPayments"][0]["customer"]["name"], "Sneha Gupta");
}

#[tokio::test]
async fn stats_require_admin_or_finance() {
    let app = test_app().await;

    let (status, error) = get(&app.router, SUPPORT_TOKEN, "/payments/stats").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden: Insufficient permissions");

    let (status, _) = get(&app.router, ADMIN_TOKEN, "/payments/stats").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn list_filters_by_status_and_embeds_projections() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Vikram Singh", "+919123456789").await;

    let (_, first) = post(
        &app.router,
        FINANCE_TOKEN,
        "/payments",
        json!({"customerId": customer, "amount": 1500, "paymentMode": "UPI"}),
    )
    .await;
    let (_, second) = post(
        &app.router,
        FINANCE_TOKEN,
        "/payments",
        json!({"customerId": customer, "amount": 2800, "paymentMode": "CARD"}),
    )
    .await;
    let second_id = id_of(&second);
    put(
        &app.router,
        FINANCE_TOKEN,
        &format!("/payments/{second_id}"),
        json!({"status": "FAILED"}),
    )
    .await;

    let (_, page) = get(&app.router, ADMIN_TOKEN, "/payments?status=PAID").await;
    assert_eq!(page["pagination"]["total"], 1);
    assert_eq!(page["data"][0]["id"], first["id"]);
    assert_eq!(page["data"][0]["customer"]["phone"], "+919123456789");
    // Walk-in payment, no contract behind it.
    assert_eq!(page["data"][0]["amc"], json!(null));

    let (_, page) = get(
        &app.router,
        ADMIN_TOKEN,
        &format!("/payments?customerId={customer}"),
    )
    .await;
    assert_eq!(page["pagination"]["total"], 2);
}
