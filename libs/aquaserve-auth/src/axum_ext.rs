//! Axum extractor and middleware for session handling.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::resolver::SessionResolver;
use crate::session::{AuthError, Session};

/// Extractor handing the resolved [`Session`] to a handler.
///
/// Rejects with 401 `Unauthorized` when [`resolve_session`] did not place a
/// session into the request extensions, so merely adding this argument makes
/// a route require authentication.
#[derive(Debug, Clone)]
pub struct Authn(pub Session);

impl<S> FromRequestParts<S> for Authn
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Authn)
            .ok_or(AuthError::Unauthenticated)
    }
}

/// Middleware resolving `Authorization: Bearer <token>` once per request.
///
/// A resolvable token puts a [`Session`] into the request extensions; a
/// missing, unknown or failing token leaves the request anonymous and lets
/// the route's extractors decide. Resolver failures are logged, never
/// surfaced.
pub async fn resolve_session(
    State(resolver): State<Arc<dyn SessionResolver>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(request.headers()) {
        match resolver.resolve(token).await {
            Ok(Some(session)) => {
                request.extensions_mut().insert(session);
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "session resolution failed, treating as anonymous");
            }
        }
    }
    next.run(request).await
}

/// Extract the bearer token from the `Authorization` header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{StaticSessionResolver, StaticTokenEntry};
    use crate::session::Role;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::{middleware, Router};
    use tower::ServiceExt as _;
    use uuid::Uuid;

    async fn whoami(Authn(session): Authn) -> String {
        session.name
    }

    fn test_router() -> Router {
        let resolver: Arc<dyn SessionResolver> =
            Arc::new(StaticSessionResolver::new(vec![StaticTokenEntry {
                token: "support-token".to_owned(),
                user_id: Uuid::now_v7(),
                name: "Priya".to_owned(),
                email: "priya@example.com".to_owned(),
                role: Role::Support,
            }]));

        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn_with_state(resolver, resolve_session))
    }

    async fn send(router: Router, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = HttpRequest::builder().method("GET").uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        let response = router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body)
            .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&body).into()));
        (status, json)
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (status, json) = send(test_router(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Unauthorized");
    }

    #[tokio::test]
    async fn unknown_token_is_unauthorized() {
        let (status, _) = send(test_router(), Some("Bearer nope")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn known_token_reaches_the_handler() {
        let (status, json) = send(test_router(), Some("Bearer support-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::Value::String("Priya".to_owned()));
    }

    #[test]
    fn bearer_extraction_trims_and_requires_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer  abc ".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), Some("abc"));

        headers.insert("authorization", "Basic abc".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
