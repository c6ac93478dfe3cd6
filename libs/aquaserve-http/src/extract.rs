//! Extractor wrappers that keep rejections inside the error envelope.
//!
//! Axum's own `Json`/`Query`/`Path` rejections answer with plain-text
//! bodies. Every AquaServe error is `{"error": "<message>"}`, so handlers
//! use these wrappers instead; malformed input becomes a 400 with the
//! rejection's message in the envelope.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, OptionalFromRequest, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body, rejections mapped to a 400 envelope.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(reject_json(&rejection)),
        }
    }
}

/// `Option<ApiJson<T>>` resolves to `None` on a bodyless request instead of
/// rejecting, for endpoints whose body is optional.
impl<S, T> OptionalFromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await {
            Ok(Some(Json(value))) => Ok(Some(ApiJson(value))),
            Ok(None) => Ok(None),
            Err(rejection) => Err(reject_json(&rejection)),
        }
    }
}

fn reject_json(rejection: &JsonRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

/// Path parameters, rejections mapped to a 400 envelope.
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(reject_path(&rejection)),
        }
    }
}

fn reject_path(rejection: &PathRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}

/// Query string, rejections mapped to a 400 envelope.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(reject_query(&rejection)),
        }
    }
}

fn reject_query(rejection: &QueryRejection) -> ApiError {
    ApiError::Validation(rejection.body_text())
}
