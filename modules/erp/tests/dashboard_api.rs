//! Dashboard aggregation over the seeded demo dataset.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use aquaserve_erp::seed;

use common::{get, test_app, ADMIN_TOKEN, SUPPORT_TOKEN, TECHNICIAN_TOKEN};

#[tokio::test]
async fn stats_summarize_the_seeded_dataset() {
    let app = test_app().await;
    seed::run(&app.db).await.expect("seed");

    let (status, stats) = get(&app.router, ADMIN_TOKEN, "/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK, "{stats}");

    assert_eq!(stats["customers"]["total"], 5);
    assert_eq!(
        stats["amc"],
        json!({"active": 3, "expiringSoon": 0, "expired": 1})
    );
    assert_eq!(stats["complaints"], json!({"open": 1, "inProgress": 1}));
    // Only the walk-in payment is dated in the current month.
    assert_eq!(stats["payments"]["monthlyRevenue"], json!(1500.0));
    assert_eq!(stats["payments"]["pendingAmount"], json!(3200.0));
    assert_eq!(stats["payments"]["pendingCount"], 1);

    let complaints = stats["recent"]["complaints"].as_array().expect("array");
    assert_eq!(complaints.len(), 3);
    assert!(complaints[0]["customer"]["name"].is_string());
    assert!(complaints[0]["service"]["serviceType"].is_string());

    let payments = stats["recent"]["payments"].as_array().expect("array");
    assert_eq!(payments.len(), 5);
    assert!(payments[0]["customer"]["name"].is_string());
}

#[tokio::test]
async fn stats_are_for_office_roles_only() {
    let app = test_app().await;

    let (status, error) = get(&app.router, TECHNICIAN_TOKEN, "/dashboard/stats").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["error"], "Forbidden: Insufficient permissions");

    let (status, _) = get(&app.router, SUPPORT_TOKEN, "/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn stats_on_an_empty_database_read_zero() {
    let app = test_app().await;

    let (status, stats) = get(&app.router, ADMIN_TOKEN, "/dashboard/stats").await;
    assert_eq!(status, StatusCode::OK, "{stats}");
    assert_eq!(stats["customers"]["total"], 0);
    assert_eq!(
        stats["amc"],
        json!({"active": 0, "expiringSoon": 0, "expired": 0})
    );
    assert_eq!(stats["payments"]["monthlyRevenue"], json!(0.0));
    assert_eq!(stats["payments"]["pendingCount"], 0);
    assert!(stats["recent"]["complaints"].as_array().expect("array").is_empty());
    assert!(stats["recent"]["payments"].as_array().expect("array").is_empty());
}
