use aquaserve_http::ApiError;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Staff role attached to a session, gating which operations it may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Finance,
    Support,
    Technician,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Finance => "FINANCE",
            Role::Support => "SUPPORT",
            Role::Technician => "TECHNICIAN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "FINANCE" => Ok(Role::Finance),
            "SUPPORT" => Ok(Role::Support),
            "TECHNICIAN" => Ok(Role::Technician),
            other => Err(UnknownRoleError(other.to_owned())),
        }
    }
}

/// Resolved caller identity for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Session {
    /// Pure predicate, no side effect.
    #[must_use]
    pub fn has_role(&self, allowed: &[Role]) -> bool {
        allowed.contains(&self.role)
    }

    /// Short-circuits with [`AuthError::Forbidden`] unless the session's
    /// role is one of `allowed`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` on a role mismatch.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), AuthError> {
        if self.has_role(allowed) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Auth failures, serialized through the shared error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No session could be resolved from the request.
    #[error("Unauthorized")]
    Unauthenticated,

    /// Session present, but its role is not allowed here.
    #[error("Forbidden: Insufficient permissions")]
    Forbidden,
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => ApiError::Unauthorized,
            AuthError::Forbidden => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session {
            user_id: Uuid::now_v7(),
            name: "Asha Rao".to_owned(),
            email: "asha@example.com".to_owned(),
            role,
        }
    }

    #[test]
    fn has_role_is_membership() {
        let s = session(Role::Support);
        assert!(s.has_role(&[Role::Admin, Role::Support]));
        assert!(!s.has_role(&[Role::Admin, Role::Finance]));
        assert!(!s.has_role(&[]));
    }

    #[test]
    fn require_role_short_circuits_with_forbidden() {
        let s = session(Role::Technician);
        assert!(s.require_role(&[Role::Technician]).is_ok());
        assert_eq!(
            s.require_role(&[Role::Admin]).unwrap_err(),
            AuthError::Forbidden
        );
    }

    #[test]
    fn role_round_trips_screaming_case() {
        for role in [Role::Admin, Role::Finance, Role::Support, Role::Technician] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        let json = serde_json::to_string(&Role::Technician).unwrap();
        assert_eq!(json, "\"TECHNICIAN\"");
        assert!("OPERATOR".parse::<Role>().is_err());
    }

    #[test]
    fn auth_errors_carry_the_wire_messages() {
        assert_eq!(AuthError::Unauthenticated.to_string(), "Unauthorized");
        assert_eq!(
            AuthError::Forbidden.to_string(),
            "Forbidden: Insufficient permissions"
        );
    }
}
