//! REST surface of the ERP module.
//!
//! Handlers are thin: enforce the role gate, convert wire input, call the
//! domain service, convert the result back. Everything data-dependent
//! (technician ownership, linked-record checks, transactions) stays in the
//! services.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
