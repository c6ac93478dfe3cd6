use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    AmcContract, AmcDetail, AmcListQuery, AmcPatch, AmcStatus, AmcWithRefs,
};
use crate::domain::repos::AmcRepository;
use crate::infra::storage::entity::{amc, customer, payment, service};
use crate::infra::storage::mapper;

use super::{customer_ref_map, require_ref, service_ref_map};

/// SeaORM implementation of [`AmcRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmAmcRepository;

fn list_condition(query: &AmcListQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = query.status {
        cond = cond.add(amc::Column::Status.eq(status));
    }
    if let Some(customer_id) = query.customer_id {
        cond = cond.add(amc::Column::CustomerId.eq(customer_id));
    }
    cond
}

impl SeaOrmAmcRepository {
    /// Attaches customer and service projections to contract rows.
    async fn with_refs<C: ConnectionTrait>(
        runner: &C,
        rows: Vec<amc::Model>,
    ) -> DomainResult<Vec<AmcWithRefs>> {
        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let service_ids: Vec<Uuid> = rows.iter().map(|m| m.service_id).collect();
        let customers = customer_ref_map(runner, &customer_ids).await?;
        let services = service_ref_map(runner, &service_ids).await?;

        rows.into_iter()
            .map(|m| {
                let customer = require_ref(&customers, m.customer_id, "customer")?;
                let service = require_ref(&services, m.service_id, "service")?;
                Ok(AmcWithRefs {
                    contract: m.into(),
                    customer,
                    service,
                })
            })
            .collect()
    }
}

#[async_trait]
impl AmcRepository for SeaOrmAmcRepository {
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &AmcListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<AmcWithRefs>> {
        let cond = list_condition(query);

        let total = amc::Entity::find().filter(cond.clone()).count(runner).await?;

        let rows = amc::Entity::find()
            .filter(cond)
            .order_by(amc::Column::EndDate, Order::Asc)
            .order_by(amc::Column::Id, Order::Asc)
            .limit(slice.limit)
            .offset(slice.offset())
            .all(runner)
            .await?;

        let items = Self::with_refs(runner, rows).await?;
        Ok(Page::new(items, slice, total))
    }

    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<AmcContract>> {
        let found = amc::Entity::find_by_id(id).one(runner).await?;
        Ok(found.map(Into::into))
    }

    async fn get_with_refs<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<AmcWithRefs>> {
        let Some(found) = amc::Entity::find_by_id(id).one(runner).await? else {
            return Ok(None);
        };
        let mut items = Self::with_refs(runner, vec![found]).await?;
        Ok(items.pop())
    }

    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<AmcDetail>> {
        let Some(found) = amc::Entity::find_by_id(id).one(runner).await? else {
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
        let unit = service::Entity::find_by_id(found.service_id)
            .one(runner)
            .await?
            .ok_or_else(|| {
                DomainError::invariant(format!("dangling service reference: {}", found.service_id))
            })?;

        let payments: Vec<_> = payment::Entity::find()
            .filter(payment::Column::AmcId.eq(id))
            .order_by(payment::Column::CreatedAt, Order::Desc)
            .order_by(payment::Column::Id, Order::Desc)
            .all(runner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(AmcDetail {
            contract: found.into(),
            customer: owner.into(),
            service: unit.into(),
            payments,
        }))
    }

    async fn exists<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool> {
        let found = amc::Entity::find_by_id(id).one(runner).await?;
        Ok(found.is_some())
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        contract: AmcContract,
    ) -> DomainResult<AmcContract> {
        let _ = mapper::amc_to_active_model(&contract).insert(runner).await?;
        Ok(contract)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &AmcPatch,
    ) -> DomainResult<Option<AmcContract>> {
        let result = amc::Entity::update_many()
            .set(mapper::amc_patch_to_active_model(patch))
            .filter(amc::Column::Id.eq(id))
            .exec(runner)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(runner, id).await
    }

    async fn delete<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool> {
        let result = amc::Entity::delete_many()
            .filter(amc::Column::Id.eq(id))
            .exec(runner)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn status_counts<C: ConnectionTrait>(
        &self,
        runner: &C,
    ) -> DomainResult<Vec<(AmcStatus, u64)>> {
        let rows: Vec<(AmcStatus, i64)> = amc::Entity::find()
            .select_only()
            .column(amc::Column::Status)
            .column_as(amc::Column::Id.count(), "count")
            .group_by(amc::Column::Status)
            .into_tuple()
            .all(runner)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(status, n)| (status, u64::try_from(n).unwrap_or_default()))
            .collect())
    }

    async fn count_active_expiring<C: ConnectionTrait>(
        &self,
        runner: &C,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<u64> {
        Ok(amc::Entity::find()
            .filter(amc::Column::Status.eq(AmcStatus::Active))
            .filter(amc::Column::EndDate.gt(from))
            .filter(amc::Column::EndDate.lte(to))
            .count(runner)
            .await?)
    }
}
