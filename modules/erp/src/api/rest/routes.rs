//! Route registration.

use std::sync::Arc;

use aquaserve_auth::{axum_ext, SessionResolver};
use axum::extract::Extension;
use axum::middleware;
use axum::routing::get;
use axum::Router;

use super::handlers::{amc, complaints, customers, dashboard, notifications, payments, services};
use crate::module::ErpModule;

/// Builds the module router.
///
/// Every route sits behind the session middleware; the `Authn` extractor on
/// each handler turns an anonymous request into a 401 and the role gates
/// inside the handlers decide the rest.
pub fn router(module: &ErpModule, resolver: Arc<dyn SessionResolver>) -> Router {
    Router::new()
        .route(
            "/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route(
            "/services",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/services/{id}",
            get(services::get_service)
                .put(services::update_service)
                .delete(services::delete_service),
        )
        .route("/amc", get(amc::list_contracts).post(amc::create_contract))
        .route(
            "/amc/{id}",
            get(amc::get_contract)
                .put(amc::update_contract)
                .delete(amc::delete_contract),
        )
        .route("/amc/{id}/renew", axum::routing::post(amc::renew_contract))
        .route(
            "/payments",
            get(payments::list_payments).post(payments::create_payment),
        )
        // Static segment, takes precedence over /payments/{id}.
        .route("/payments/stats", get(payments::payment_stats))
        .route(
            "/payments/{id}",
            get(payments::get_payment).put(payments::update_payment),
        )
        .route(
            "/complaints",
            get(complaints::list_complaints).post(complaints::create_complaint),
        )
        // PUT and PATCH are aliases; the dashboard UI sends either.
        .route(
            "/complaints/{id}",
            get(complaints::get_complaint)
                .put(complaints::update_complaint)
                .patch(complaints::update_complaint),
        )
        .route(
            "/complaints/{id}/assign",
            axum::routing::post(complaints::assign_complaint),
        )
        .route(
            "/notifications",
            get(notifications::list_notifications)
                .post(notifications::create_notification)
                .patch(notifications::mark_notifications_read),
        )
        .route("/dashboard/stats", get(dashboard::dashboard_stats))
        .layer(Extension(module.customers.clone()))
        .layer(Extension(module.services.clone()))
        .layer(Extension(module.amc.clone()))
        .layer(Extension(module.payments.clone()))
        .layer(Extension(module.complaints.clone()))
        .layer(Extension(module.notifications.clone()))
        .layer(Extension(module.dashboard.clone()))
        .layer(middleware::from_fn_with_state(
            resolver,
            axum_ext::resolve_session,
        ))
}
