use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::{Role, Session};

/// Boundary to the external auth provider.
///
/// Implementations map a bearer token to a session, or `None` when the token
/// does not correspond to a live session. Transport or provider failures are
/// errors; the middleware logs them and treats the request as anonymous.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Session>>;
}

/// One configured identity for [`StaticSessionResolver`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticTokenEntry {
    pub token: String,
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Config-declared token table, for development and tests.
///
/// Production deployments plug a real provider behind [`SessionResolver`];
/// this resolver just answers from the `auth.tokens` section of the config
/// file.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionResolver {
    sessions: HashMap<String, Session>,
}

impl StaticSessionResolver {
    #[must_use]
    pub fn new(entries: Vec<StaticTokenEntry>) -> Self {
        let sessions = entries
            .into_iter()
            .map(|e| {
                (
                    e.token,
                    Session {
                        user_id: e.user_id,
                        name: e.name,
                        email: e.email,
                        role: e.role,
                    },
                )
            })
            .collect();
        Self { sessions }
    }

    #[must_use]
    pub fn into_shared(self) -> Arc<dyn SessionResolver> {
        Arc::new(self)
    }
}

#[async_trait]
impl SessionResolver for StaticSessionResolver {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_declared_identity() {
        let user_id = Uuid::now_v7();
        let resolver = StaticSessionResolver::new(vec![StaticTokenEntry {
            token: "admin-token".to_owned(),
            user_id,
            name: "Admin".to_owned(),
            email: "admin@example.com".to_owned(),
            role: Role::Admin,
        }]);

        let session = resolver.resolve("admin-token").await.unwrap().unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.role, Role::Admin);

        assert!(resolver.resolve("other-token").await.unwrap().is_none());
    }
}
