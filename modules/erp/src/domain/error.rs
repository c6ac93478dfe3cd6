use sea_orm::DbErr;
use thiserror::Error;

/// Domain-level failures surfaced by services and repositories.
///
/// The REST layer maps these onto wire errors; nothing here carries HTTP
/// semantics directly.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Input failed a business rule or shape check.
    #[error("{message}")]
    Validation { message: String },

    /// A referenced aggregate does not exist.
    #[error("{what} not found")]
    NotFound { what: String },

    /// The caller's role does not permit the operation.
    #[error("{message}")]
    Forbidden { message: String },

    /// The operation conflicts with existing state.
    #[error("{message}")]
    Conflict { message: String },

    /// Stored data violates an invariant the domain relies on.
    #[error("invariant violation: {0}")]
    Invariant(String),

    /// Database failure bubbled up from the storage layer.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant(message.into())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_formats_the_subject() {
        let err = DomainError::not_found("AMC Contract");
        assert_eq!(err.to_string(), "AMC Contract not found");
    }

    #[test]
    fn validation_carries_the_message_verbatim() {
        let err = DomainError::validation("Months must be between 1 and 36");
        assert_eq!(err.to_string(), "Months must be between 1 and 36");
    }
}
