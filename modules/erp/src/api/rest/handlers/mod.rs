//! REST handlers, one module per resource.
//!
//! Role gates run here, before any service call; data-dependent rules such
//! as technician ownership stay in the services. Every handler returns
//! [`aquaserve_http::ApiResult`] so domain and auth failures flow through
//! the shared error envelope.

pub mod amc;
pub mod complaints;
pub mod customers;
pub mod dashboard;
pub mod notifications;
pub mod payments;
pub mod services;
