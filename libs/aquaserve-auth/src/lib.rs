//! Session resolution and role gating for AquaServe REST services.
//!
//! Session issuance and verification live with an external auth provider;
//! this crate only defines the seam. A [`SessionResolver`] turns a bearer
//! token into a [`Session`], the [`axum_ext::resolve_session`] middleware
//! runs it once per request and stashes the result in request extensions, and
//! the [`axum_ext::Authn`] extractor hands it to handlers. Handlers pass the
//! session explicitly into every domain call; there is no ambient caller
//! state.

pub mod axum_ext;
pub mod resolver;
pub mod session;

pub use axum_ext::Authn;
pub use resolver::{SessionResolver, StaticSessionResolver, StaticTokenEntry};
pub use session::{AuthError, Role, Session, UnknownRoleError};
