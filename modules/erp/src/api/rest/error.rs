//! Maps domain failures onto wire errors.

use aquaserve_http::ApiError;

use crate::domain::error::DomainError;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => ApiError::Validation(message),
            DomainError::NotFound { what } => ApiError::not_found(&what),
            DomainError::Forbidden { message } => ApiError::Forbidden(message),
            DomainError::Conflict { message } => ApiError::Conflict(message),
            // Both carry internals the caller must never see. Log the cause
            // here, at the boundary where it turns generic.
            DomainError::Invariant(_) | DomainError::Database(_) => {
                tracing::error!(error = %err, "request failed");
                ApiError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn domain_errors_map_to_their_statuses() {
        let err: ApiError = DomainError::validation("Amount must be positive").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Amount must be positive");

        let err: ApiError = DomainError::not_found("Customer").into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Customer not found");

        let err: ApiError = DomainError::forbidden("Forbidden").into();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err: ApiError =
            DomainError::conflict("Customer has linked records and cannot be deleted").into();
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_causes_never_reach_the_wire() {
        let err: ApiError = DomainError::invariant("dangling customer reference").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");

        let err: ApiError =
            DomainError::Database(sea_orm::DbErr::Custom("connection reset".into())).into();
        assert_eq!(err.to_string(), "Internal server error");
    }
}
