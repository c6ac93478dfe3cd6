use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::StaffUser;
use crate::domain::repos::UsersRepository;
use crate::infra::storage::entity::user;
use crate::infra::storage::mapper;

/// SeaORM implementation of [`UsersRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmUsersRepository;

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<StaffUser>> {
        let found = user::Entity::find_by_id(id).one(runner).await?;
        found.map(mapper::staff_user_from_model).transpose()
    }

    async fn find_by_email<C: ConnectionTrait>(
        &self,
        runner: &C,
        email: &str,
    ) -> DomainResult<Option<StaffUser>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(runner)
            .await?;
        found.map(mapper::staff_user_from_model).transpose()
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        user: StaffUser,
    ) -> DomainResult<StaffUser> {
        let _ = mapper::staff_user_to_active_model(&user).insert(runner).await?;
        Ok(user)
    }
}
