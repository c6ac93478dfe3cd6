use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::StaffUser;

/// Persistence operations for staff accounts. There is no REST CRUD for
/// users; they back authorization checks and technician assignment.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn get<C: ConnectionTrait>(&self, runner: &C, id: Uuid)
    -> DomainResult<Option<StaffUser>>;

    async fn find_by_email<C: ConnectionTrait>(
        &self,
        runner: &C,
        email: &str,
    ) -> DomainResult<Option<StaffUser>>;

    async fn insert<C: ConnectionTrait>(&self, runner: &C, user: StaffUser)
    -> DomainResult<StaffUser>;
}
