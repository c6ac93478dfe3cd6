use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Value,
};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    AmcWithService, Payment, PaymentDetail, PaymentListQuery, PaymentPatch, PaymentStatus,
    PaymentWithRefs, RecentPayment, ServiceRef,
};
use crate::domain::repos::PaymentsRepository;
use crate::infra::storage::entity::{amc, customer, finance, payment, service};
use crate::infra::storage::mapper;

use super::{amc_ref_map, customer_name_map, customer_ref_map, require_ref};

/// SeaORM implementation of [`PaymentsRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmPaymentsRepository;

fn list_condition(query: &PaymentListQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = query.status {
        cond = cond.add(payment::Column::Status.eq(status));
    }
    if let Some(customer_id) = query.customer_id {
        cond = cond.add(payment::Column::CustomerId.eq(customer_id));
    }
    cond
}

#[async_trait]
impl PaymentsRepository for SeaOrmPaymentsRepository {
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &PaymentListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<PaymentWithRefs>> {
        let cond = list_condition(query);

        let total = payment::Entity::find()
            .filter(cond.clone())
            .count(runner)
            .await?;

        let rows = payment::Entity::find()
            .filter(cond)
            .order_by(payment::Column::CreatedAt, Order::Desc)
            .order_by(payment::Column::Id, Order::Desc)
            .limit(slice.limit)
            .offset(slice.offset())
            .all(runner)
            .await?;

        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let amc_ids: Vec<Uuid> = rows.iter().filter_map(|m| m.amc_id).collect();
        let customers = customer_ref_map(runner, &customer_ids).await?;
        let contracts = amc_ref_map(runner, &amc_ids).await?;

        let items = rows
            .into_iter()
            .map(|m| {
                let customer = require_ref(&customers, m.customer_id, "customer")?;
                let amc = match m.amc_id {
                    Some(amc_id) => Some(require_ref(&contracts, amc_id, "contract")?),
                    None => None,
                };
                Ok(PaymentWithRefs {
                    payment: m.into(),
                    customer,
                    amc,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Ok(Page::new(items, slice, total))
    }

    async fn get<C: ConnectionTrait>(&self, runner: &C, id: Uuid) -> DomainResult<Option<Payment>> {
        let found = payment::Entity::find_by_id(id).one(runner).await?;
        Ok(found.map(Into::into))
    }

    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<PaymentDetail>> {
        let Some(found) = payment::Entity::find_by_id(id).one(runner).await? else {
            return Ok(None);
        };

        let payer = customer::Entity::find_by_id(found.customer_id)
            .one(runner)
            .await?
            .ok_or_else(|| {
                DomainError::invariant(format!(
                    "dangling customer reference: {}",
                    found.customer_id
                ))
            })?;

        let contract = match found.amc_id {
            Some(amc_id) => match amc::Entity::find_by_id(amc_id).one(runner).await? {
                Some(contract_row) => {
                    let unit = service::Entity::find_by_id(contract_row.service_id)
                        .one(runner)
                        .await?
                        .ok_or_else(|| {
                            DomainError::invariant(format!(
                                "dangling service reference: {}",
                                contract_row.service_id
                            ))
                        })?;
                    Some(AmcWithService {
                        contract: contract_row.into(),
                        service: ServiceRef {
                            id: unit.id,
                            service_type: unit.service_type,
                        },
                    })
                }
                None => None,
            },
            None => None,
        };

        let finance_log = finance::Entity::find()
            .filter(finance::Column::PaymentId.eq(id))
            .one(runner)
            .await?
            .map(Into::into);

        Ok(Some(PaymentDetail {
            payment: found.into(),
            customer: payer.into(),
            amc: contract,
            finance_log,
        }))
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        payment: Payment,
    ) -> DomainResult<Payment> {
        let _ = mapper::payment_to_active_model(&payment).insert(runner).await?;
        Ok(payment)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &PaymentPatch,
    ) -> DomainResult<Option<Payment>> {
        let result = payment::Entity::update_many()
            .set(mapper::payment_patch_to_active_model(patch))
            .filter(payment::Column::Id.eq(id))
            .exec(runner)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(runner, id).await
    }

    async fn detach_from_amc<C: ConnectionTrait>(
        &self,
        runner: &C,
        amc_id: Uuid,
    ) -> DomainResult<u64> {
        let result = payment::Entity::update_many()
            .col_expr(payment::Column::AmcId, Expr::value(Value::Uuid(None)))
            .filter(payment::Column::AmcId.eq(amc_id))
            .exec(runner)
            .await?;
        Ok(result.rows_affected)
    }

    async fn sum_paid<C: ConnectionTrait>(
        &self,
        runner: &C,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<Decimal> {
        let mut find = payment::Entity::find()
            .select_only()
            .column_as(payment::Column::Amount.sum(), "total")
            .filter(payment::Column::Status.eq(PaymentStatus::Paid));
        if let Some(from) = from {
            find = find.filter(payment::Column::PaymentDate.gte(from));
        }
        if let Some(to) = to {
            find = find.filter(payment::Column::PaymentDate.lt(to));
        }
        let total: Option<Option<Decimal>> = find.into_tuple().one(runner).await?;
        Ok(total.flatten().unwrap_or_default())
    }

    async fn status_totals<C: ConnectionTrait>(
        &self,
        runner: &C,
        status: PaymentStatus,
    ) -> DomainResult<(Decimal, u64)> {
        let row: Option<(Option<Decimal>, i64)> = payment::Entity::find()
            .select_only()
            .column_as(payment::Column::Amount.sum(), "total")
            .column_as(payment::Column::Id.count(), "count")
            .filter(payment::Column::Status.eq(status))
            .into_tuple()
            .one(runner)
            .await?;
        let (total, count) = row.unwrap_or((None, 0));
        Ok((
            total.unwrap_or_default(),
            u64::try_from(count).unwrap_or_default(),
        ))
    }

    async fn recent_with_customer<C: ConnectionTrait>(
        &self,
        runner: &C,
        limit: u64,
    ) -> DomainResult<Vec<RecentPayment>> {
        let rows = payment::Entity::find()
            .order_by(payment::Column::CreatedAt, Order::Desc)
            .order_by(payment::Column::Id, Order::Desc)
            .limit(limit)
            .all(runner)
            .await?;

        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let names = customer_name_map(runner, &customer_ids).await?;

        rows.into_iter()
            .map(|m| {
                let customer_name = require_ref(&names, m.customer_id, "customer")?;
                Ok(RecentPayment {
                    payment: m.into(),
                    customer_name,
                })
            })
            .collect()
    }
}
