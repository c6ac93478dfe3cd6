use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Wire shape of every non-2xx response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message, safe to show to the caller.
    pub error: String,
}

/// Errors a REST handler may surface, each carrying its HTTP status.
///
/// The `Display` impl is the wire message; `Internal` deliberately renders a
/// fixed string so no database or stack detail ever reaches the caller. The
/// underlying cause must be logged at the point where `Internal` is produced.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400, first violated constraint surfaced verbatim.
    #[error("{0}")]
    Validation(String),

    /// 401, no resolvable session.
    #[error("Unauthorized")]
    Unauthorized,

    /// 403, role or ownership mismatch.
    #[error("{0}")]
    Forbidden(String),

    /// 404, referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// 409, the operation contradicts existing state.
    #[error("{0}")]
    Conflict(String),

    /// 500, catch-all. Cause stays in the logs.
    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    /// Builds the conventional `<What> not found` message.
    #[must_use]
    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{what} not found"))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Handler result alias so `?` propagates straight to the wire.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::forbidden("no").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::not_found("Customer").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("linked").status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_builds_conventional_message() {
        assert_eq!(
            ApiError::not_found("AMC Contract").to_string(),
            "AMC Contract not found"
        );
    }

    #[test]
    fn internal_never_leaks_detail() {
        assert_eq!(ApiError::Internal.to_string(), "Internal server error");
    }

    #[tokio::test]
    async fn response_body_is_error_envelope() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Unauthorized"}));
    }
}
