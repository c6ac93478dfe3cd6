//! Shared HTTP plumbing for AquaServe REST surfaces.
//!
//! Every service speaks the same wire dialect: non-2xx responses carry an
//! `{"error": "<message>"}` body, and list endpoints wrap their rows in a
//! `{"data": [...], "pagination": {...}}` envelope. The types here are the
//! single definition of both.

pub mod error;
pub mod extract;
pub mod pagination;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use pagination::{MAX_PAGE_LIMIT, Page, PageParams, PageSlice, Pagination};
