//! OpenAPI document for the ERP surface.
//!
//! Schemas are collected automatically from the handler annotations; only
//! the bearer scheme needs manual wiring.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::handlers::{amc, complaints, customers, dashboard, notifications, payments, services};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AquaServe ERP API",
        description = "Customers, installed services, AMC contracts, payments and complaints for a water-purifier service business."
    ),
    servers((url = "/api", description = "Module mount point")),
    paths(
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        services::list_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        amc::list_contracts,
        amc::get_contract,
        amc::create_contract,
        amc::update_contract,
        amc::renew_contract,
        amc::delete_contract,
        payments::list_payments,
        payments::payment_stats,
        payments::get_payment,
        payments::create_payment,
        payments::update_payment,
        complaints::list_complaints,
        complaints::get_complaint,
        complaints::create_complaint,
        complaints::update_complaint,
        complaints::assign_complaint,
        notifications::list_notifications,
        notifications::create_notification,
        notifications::mark_notifications_read,
        dashboard::dashboard_stats,
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "customers", description = "Customer directory"),
        (name = "services", description = "Installed purifier units"),
        (name = "amc", description = "Annual maintenance contracts"),
        (name = "payments", description = "Payments and finance ledger"),
        (name = "complaints", description = "Complaint workflow"),
        (name = "notifications", description = "Customer notification feed"),
        (name = "dashboard", description = "Overview aggregates")
    )
)]
pub struct ApiDoc;

/// Marks every operation as requiring `Authorization: Bearer <token>`.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
        openapi.security = Some(vec![SecurityRequirement::new(
            "bearerAuth",
            Vec::<String>::new(),
        )]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_route() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/customers",
            "/customers/{id}",
            "/services",
            "/services/{id}",
            "/amc",
            "/amc/{id}",
            "/amc/{id}/renew",
            "/payments",
            "/payments/stats",
            "/payments/{id}",
            "/complaints",
            "/complaints/{id}",
            "/complaints/{id}/assign",
            "/notifications",
            "/dashboard/stats",
        ] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_declared() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearerAuth"));
        assert!(doc.security.is_some());
    }
}
