//! AquaServe ERP module.
//!
//! Implements the service-business backbone: customers, installed purifier
//! services, AMC (annual maintenance contract) tracking, payments with a
//! finance ledger, complaint workflow with technician assignment, in-app
//! notifications, staff accounts and the dashboard aggregates.
//!
//! Layering follows the usual split:
//!
//! - [`domain`] holds plain models, repository traits and services. Services
//!   carry the business rules and are generic over the repository traits.
//! - [`infra`] provides the `sea-orm` entities, migrations and repository
//!   implementations.
//! - [`api`] exposes the REST surface (DTOs, handlers, router).
//!
//! [`ErpModule`] wires the three together for the host binary.

pub mod api;
pub mod domain;
pub mod infra;
pub mod module;
pub mod seed;

pub use module::ErpModule;
