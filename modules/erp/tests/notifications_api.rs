//! Notification feed endpoints: manual creation, the bare-array feed and
//! bulk mark-read.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{get, given_customer, id_of, patch, post, test_app, ADMIN_TOKEN, TECHNICIAN_TOKEN};

#[tokio::test]
async fn create_requires_every_field() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Rahul Sharma", "+919876543210").await;

    let gaps = [
        json!({}),
        json!({"customerId": customer}),
        json!({"customerId": customer, "type": "GENERAL"}),
        json!({"customerId": customer, "type": "", "message": "Filter due"}),
        json!({"customerId": customer, "type": "GENERAL", "message": ""}),
    ];
    for body in gaps {
        let (status, error) = post(&app.router, ADMIN_TOKEN, "/notifications", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"], "Missing required fields");
    }
}

#[tokio::test]
async fn create_rejects_unknown_customers() {
    let app = test_app().await;

    let (status, error) = post(
        &app.router,
        ADMIN_TOKEN,
        "/notifications",
        json!({
            "customerId": Uuid::nil(),
            "type": "PAYMENT_REMINDER",
            "message": "Your AMC renewal is due next week.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Customer not found");
}

#[tokio::test]
async fn feed_is_newest_first_with_the_customer_projection() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Priya Patel", "+919898989898").await;

    let (status, first) = post(
        &app.router,
        ADMIN_TOKEN,
        "/notifications",
        json!({
            "customerId": customer,
            "type": "PAYMENT_REMINDER",
            "message": "Your AMC renewal is due next week.",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    let (_, second) = post(
        &app.router,
        ADMIN_TOKEN,
        "/notifications",
        json!({
            "customerId": customer,
            "type": "GENERAL",
            "message": "Service visit rescheduled to Friday.",
        }),
    )
    .await;

    // Any authenticated session can read the feed.
    let (status, feed) = get(&app.router, TECHNICIAN_TOKEN, "/notifications").await;
    assert_eq!(status, StatusCode::OK, "{feed}");
    let rows = feed.as_array().expect("bare array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], second["id"]);
    assert_eq!(rows[0]["type"], "GENERAL");
    assert_eq!(rows[0]["isRead"], json!(false));
    assert_eq!(rows[0]["customer"]["name"], "Priya Patel");
    assert_eq!(rows[1]["id"], first["id"]);
}

#[tokio::test]
async fn unread_filter_and_bulk_mark_read() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Amit Kumar", "+917654321098").await;
    let mut ids = Vec::new();
    for message in [
        "Your complaint has been registered.",
        "Technician visit scheduled.",
        "Payment received, thank you.",
    ] {
        let (_, created) = post(
            &app.router,
            ADMIN_TOKEN,
            "/notifications",
            json!({"customerId": customer, "type": "GENERAL", "message": message}),
        )
        .await;
        ids.push(id_of(&created));
    }

    let (status, marked) = patch(
        &app.router,
        ADMIN_TOKEN,
        "/notifications",
        json!({"ids": [ids[0]]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{marked}");
    assert_eq!(marked, json!({"success": true, "updated": 1}));

    let (_, unread) = get(&app.router, ADMIN_TOKEN, "/notifications?unread=true").await;
    let rows = unread.as_array().expect("bare array");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row["id"] != json!(ids[0].to_string())));

    // Unknown ids are skipped rather than rejected.
    let (_, marked) = patch(
        &app.router,
        ADMIN_TOKEN,
        "/notifications",
        json!({"ids": [Uuid::nil(), ids[1]]}),
    )
    .await;
    assert_eq!(marked["updated"], 1);

    let (status, error) = patch(&app.router, ADMIN_TOKEN, "/notifications", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Invalid notification IDs");
}

#[tokio::test]
async fn limit_caps_the_feed() {
    let app = test_app().await;
    let customer = given_customer(&app.router, "Sneha Gupta", "+918765432109").await;
    for n in 0..3 {
        post(
            &app.router,
            ADMIN_TOKEN,
            "/notifications",
            json!({
                "customerId": customer,
                "type": "GENERAL",
                "message": format!("Reminder number {n} for the service visit."),
            }),
        )
        .await;
    }

    let (_, feed) = get(&app.router, ADMIN_TOKEN, "/notifications?limit=2").await;
    assert_eq!(feed.as_array().expect("bare array").len(), 2);
}
