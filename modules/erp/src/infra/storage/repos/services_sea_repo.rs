use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    InstalledService, InstalledServicePatch, ServiceCounts, ServiceDetail, ServiceWithCustomer,
};
use crate::domain::repos::ServicesRepository;
use crate::infra::storage::entity::{amc, complaint, customer, service};
use crate::infra::storage::mapper;

use super::{customer_ref_map, grouped_counts, require_ref};

/// SeaORM implementation of [`ServicesRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmServicesRepository;

#[async_trait]
impl ServicesRepository for SeaOrmServicesRepository {
    async fn list<C: ConnectionTrait>(
        &self,
        runner: &C,
        customer_id: Option<Uuid>,
    ) -> DomainResult<Vec<ServiceWithCustomer>> {
        let mut find = service::Entity::find();
        if let Some(cid) = customer_id {
            find = find.filter(service::Column::CustomerId.eq(cid));
        }
        let rows = find
            .order_by(service::Column::CreatedAt, Order::Desc)
            .order_by(service::Column::Id, Order::Desc)
            .all(runner)
            .await?;

        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let customers = customer_ref_map(runner, &customer_ids).await?;

        let ids: Vec<Uuid> = rows.iter().map(|m| m.id).collect();
        let amc_counts = grouped_counts(
            runner,
            amc::Entity::find()
                .select_only()
                .column(amc::Column::ServiceId)
                .column_as(amc::Column::Id.count(), "count")
                .filter(amc::Column::ServiceId.is_in(ids.iter().copied()))
                .group_by(amc::Column::ServiceId),
            &ids,
        )
        .await?;
        let complaint_counts = grouped_counts(
            runner,
            complaint::Entity::find()
                .select_only()
                .column(complaint::Column::ServiceId)
                .column_as(complaint::Column::Id.count(), "count")
                .filter(complaint::Column::ServiceId.is_in(ids.iter().copied()))
                .group_by(complaint::Column::ServiceId),
            &ids,
        )
        .await?;

        rows.into_iter()
            .map(|m| {
                let customer = require_ref(&customers, m.customer_id, "customer")?;
                let counts = ServiceCounts {
                    amcs: amc_counts.get(&m.id).copied().unwrap_or_default(),
                    complaints: complaint_counts.get(&m.id).copied().unwrap_or_default(),
                };
                Ok(ServiceWithCustomer {
                    service: m.into(),
                    customer,
                    counts,
                })
            })
            .collect()
    }

    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<InstalledService>> {
        let found = service::Entity::find_by_id(id).one(runner).await?;
        Ok(found.map(Into::into))
    }

    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<ServiceDetail>> {
        let Some(found) = service::Entity::find_by_id(id).one(runner).await? else {
            return Ok(None);
        };

        let owner = customer::Entity::find_by_id(found.customer_id)
            .one(runner)
            .await?
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "dangling customer reference: {}",
                    found.customer_id
                ))
            })?;

        let contracts: Vec<_> = amc::Entity::find()
            .filter(amc::Column::ServiceId.eq(id))
            .order_by(amc::Column::CreatedAt, Order::Desc)
            .order_by(amc::Column::Id, Order::Desc)
            .all(runner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let complaints: Vec<_> = complaint::Entity::find()
            .filter(complaint::Column::ServiceId.eq(id))
            .order_by(complaint::Column::CreatedAt, Order::Desc)
            .order_by(complaint::Column::Id, Order::Desc)
            .limit(5)
            .all(runner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(ServiceDetail {
            service: found.into(),
            customer: owner.into(),
            contracts,
            complaints,
        }))
    }

    async fn exists<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool> {
        let found = service::Entity::find_by_id(id).one(runner).await?;
        Ok(found.is_some())
    }

    async fn has_linked_records<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<bool> {
        if amc::Entity::find()
            .filter(amc::Column::ServiceId.eq(id))
            .count(runner)
            .await?
            > 0
        {
            return Ok(true);
        }
        let complaints = complaint::Entity::find()
            .filter(complaint::Column::ServiceId.eq(id))
            .count(runner)
            .await?;
        Ok(complaints > 0)
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        service: InstalledService,
    ) -> DomainResult<InstalledService> {
        let _ = mapper::service_to_active_model(&service).insert(runner).await?;
        Ok(service)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &InstalledServicePatch,
    ) -> DomainResult<Option<InstalledService>> {
        let result = service::Entity::update_many()
            .set(mapper::service_patch_to_active_model(patch))
            .filter(service::Column::Id.eq(id))
            .exec(runner)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(runner, id).await
    }

    async fn delete<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool> {
        let result = service::Entity::delete_many()
            .filter(service::Column::Id.eq(id))
            .exec(runner)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
