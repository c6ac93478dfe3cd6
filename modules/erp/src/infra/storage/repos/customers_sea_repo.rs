use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::domain::error::DomainResult;
use crate::domain::model::{
    AmcWithService, Customer, CustomerCounts, CustomerDetail, CustomerListQuery, CustomerPatch,
    CustomerWithCounts,
};
use crate::domain::repos::CustomersRepository;
use crate::infra::storage::entity::{amc, complaint, customer, notification, payment, service};
use crate::infra::storage::mapper;

use super::{grouped_counts, require_ref, service_ref_map};

/// SeaORM implementation of [`CustomersRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmCustomersRepository;

fn search_condition(query: &CustomerListQuery) -> Condition {
    let mut cond = Condition::all();
    let term = query.search.as_deref().map(str::trim).unwrap_or_default();
    if !term.is_empty() {
        let pattern = format!("%{}%", term.to_lowercase());
        cond = cond.add(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(customer::Column::Name))).like(&pattern))
                .add(Expr::expr(Func::lower(Expr::col(customer::Column::Email))).like(&pattern))
                .add(customer::Column::Phone.contains(term)),
        );
    }
    cond
}

#[async_trait]
impl CustomersRepository for SeaOrmCustomersRepository {
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &CustomerListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<CustomerWithCounts>> {
        let cond = search_condition(query);

        let total = customer::Entity::find()
            .filter(cond.clone())
            .count(runner)
            .await?;

        let rows = customer::Entity::find()
            .filter(cond)
            .order_by(customer::Column::CreatedAt, Order::Desc)
            .order_by(customer::Column::Id, Order::Desc)
            .limit(slice.limit)
            .offset(slice.offset())
            .all(runner)
            .await?;

        let ids: Vec<Uuid> = rows.iter().map(|m| m.id).collect();

        let service_counts = grouped_counts(
            runner,
            service::Entity::find()
                .select_only()
                .column(service::Column::CustomerId)
                .column_as(service::Column::Id.count(), "count")
                .filter(service::Column::CustomerId.is_in(ids.iter().copied()))
                .group_by(service::Column::CustomerId),
            &ids,
        )
        .await?;
        let amc_counts = grouped_counts(
            runner,
            amc::Entity::find()
                .select_only()
                .column(amc::Column::CustomerId)
                .column_as(amc::Column::Id.count(), "count")
                .filter(amc::Column::CustomerId.is_in(ids.iter().copied()))
                .group_by(amc::Column::CustomerId),
            &ids,
        )
        .await?;
        let complaint_counts = grouped_counts(
            runner,
            complaint::Entity::find()
                .select_only()
                .column(complaint::Column::CustomerId)
                .column_as(complaint::Column::Id.count(), "count")
                .filter(complaint::Column::CustomerId.is_in(ids.iter().copied()))
                .group_by(complaint::Column::CustomerId),
            &ids,
        )
        .await?;

        let items = rows
            .into_iter()
            .map(|m| {
                let counts = CustomerCounts {
                    services: service_counts.get(&m.id).copied().unwrap_or_default(),
                    amcs: amc_counts.get(&m.id).copied().unwrap_or_default(),
                    complaints: complaint_counts.get(&m.id).copied().unwrap_or_default(),
                };
                CustomerWithCounts {
                    customer: m.into(),
                    counts,
                }
            })
            .collect();

        Ok(Page::new(items, slice, total))
    }

    async fn get<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<Customer>> {
        let found = customer::Entity::find_by_id(id).one(runner).await?;
        Ok(found.map(Into::into))
    }

    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<CustomerDetail>> {
        let Some(found) = customer::Entity::find_by_id(id).one(runner).await? else {
            return Ok(None);
        };

        let services: Vec<_> = service::Entity::find()
            .filter(service::Column::CustomerId.eq(id))
            .order_by(service::Column::CreatedAt, Order::Desc)
            .order_by(service::Column::Id, Order::Desc)
            .all(runner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let contract_rows = amc::Entity::find()
            .filter(amc::Column::CustomerId.eq(id))
            .order_by(amc::Column::CreatedAt, Order::Desc)
            .order_by(amc::Column::Id, Order::Desc)
            .all(runner)
            .await?;
        let service_ids: Vec<Uuid> = contract_rows.iter().map(|m| m.service_id).collect();
        let service_refs = service_ref_map(runner, &service_ids).await?;
        let contracts = contract_rows
            .into_iter()
            .map(|m| {
                let service = require_ref(&service_refs, m.service_id, "service")?;
                Ok(AmcWithService {
                    contract: m.into(),
                    service,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        let payments: Vec<_> = payment::Entity::find()
            .filter(payment::Column::CustomerId.eq(id))
            .order_by(payment::Column::CreatedAt, Order::Desc)
            .order_by(payment::Column::Id, Order::Desc)
            .limit(10)
            .all(runner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        let complaints: Vec<_> = complaint::Entity::find()
            .filter(complaint::Column::CustomerId.eq(id))
            .order_by(complaint::Column::CreatedAt, Order::Desc)
            .order_by(complaint::Column::Id, Order::Desc)
            .limit(5)
            .all(runner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(Some(CustomerDetail {
            customer: found.into(),
            services,
            contracts,
            payments,
            complaints,
        }))
    }

    async fn exists<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool> {
        let found = customer::Entity::find_by_id(id).one(runner).await?;
        Ok(found.is_some())
    }

    async fn has_linked_records<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<bool> {
        if service::Entity::find()
            .filter(service::Column::CustomerId.eq(id))
            .count(runner)
            .await?
            > 0
        {
            return Ok(true);
        }
        if amc::Entity::find()
            .filter(amc::Column::CustomerId.eq(id))
            .count(runner)
            .await?
            > 0
        {
            return Ok(true);
        }
        if payment::Entity::find()
            .filter(payment::Column::CustomerId.eq(id))
            .count(runner)
            .await?
            > 0
        {
            return Ok(true);
        }
        if complaint::Entity::find()
            .filter(complaint::Column::CustomerId.eq(id))
            .count(runner)
            .await?
            > 0
        {
            return Ok(true);
        }
        let notifications = notification::Entity::find()
            .filter(notification::Column::CustomerId.eq(id))
            .count(runner)
            .await?;
        Ok(notifications > 0)
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        customer: Customer,
    ) -> DomainResult<Customer> {
        let _ = mapper::customer_to_active_model(&customer).insert(runner).await?;
        Ok(customer)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &CustomerPatch,
    ) -> DomainResult<Option<Customer>> {
        let result = customer::Entity::update_many()
            .set(mapper::customer_patch_to_active_model(patch))
            .filter(customer::Column::Id.eq(id))
            .exec(runner)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(runner, id).await
    }

    async fn delete<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<bool> {
        let result = customer::Entity::delete_many()
            .filter(customer::Column::Id.eq(id))
            .exec(runner)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_all<C: ConnectionTrait>(&self, runner: &C) -> DomainResult<u64> {
        Ok(customer::Entity::find().count(runner).await?)
    }
}
