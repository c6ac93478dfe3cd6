use aquaserve_http::{Page, PageSlice};
use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::model::{
    Complaint, ComplaintDetail, ComplaintListQuery, ComplaintPatch, ComplaintStatus,
    ComplaintWithRefs, RecentComplaint,
};
use crate::domain::repos::ComplaintsRepository;
use crate::infra::storage::entity::{complaint, customer, service};
use crate::infra::storage::mapper;

use super::{customer_name_map, customer_ref_map, require_ref, service_ref_map, technician_ref_map};

/// SeaORM implementation of [`ComplaintsRepository`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SeaOrmComplaintsRepository;

fn list_condition(query: &ComplaintListQuery) -> Condition {
    let mut cond = Condition::all();
    if let Some(status) = query.status {
        cond = cond.add(complaint::Column::Status.eq(status));
    }
    if let Some(customer_id) = query.customer_id {
        cond = cond.add(complaint::Column::CustomerId.eq(customer_id));
    }
    if let Some(technician_id) = query.technician_id {
        cond = cond.add(complaint::Column::TechnicianId.eq(technician_id));
    }
    cond
}

impl SeaOrmComplaintsRepository {
    /// Attaches customer, service and technician projections to rows.
    async fn with_refs<C: ConnectionTrait>(
        runner: &C,
        rows: Vec<complaint::Model>,
    ) -> DomainResult<Vec<ComplaintWithRefs>> {
        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let service_ids: Vec<Uuid> = rows.iter().map(|m| m.service_id).collect();
        let technician_ids: Vec<Uuid> = rows.iter().filter_map(|m| m.technician_id).collect();
        let customers = customer_ref_map(runner, &customer_ids).await?;
        let services = service_ref_map(runner, &service_ids).await?;
        let technicians = technician_ref_map(runner, &technician_ids).await?;

        rows.into_iter()
            .map(|m| {
                let customer = require_ref(&customers, m.customer_id, "customer")?;
                let service = require_ref(&services, m.service_id, "service")?;
                // A technician row may have been deleted; the FK nulls the
                // column, but a concurrent read can still see the old id.
                let technician = m
                    .technician_id
                    .and_then(|id| technicians.get(&id).cloned());
                Ok(ComplaintWithRefs {
                    complaint: m.into(),
                    customer,
                    service,
                    technician,
                })
            })
            .collect()
    }
}

#[async_trait]
impl ComplaintsRepository for SeaOrmComplaintsRepository {
    async fn list_page<C: ConnectionTrait>(
        &self,
        runner: &C,
        query: &ComplaintListQuery,
        slice: PageSlice,
    ) -> DomainResult<Page<ComplaintWithRefs>> {
        let cond = list_condition(query);

        let total = complaint::Entity::find()
            .filter(cond.clone())
            .count(runner)
            .await?;

        let rows = complaint::Entity::find()
            .filter(cond)
            .order_by(complaint::Column::CreatedAt, Order::Desc)
            .order_by(complaint::Column::Id, Order::Desc)
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
    ) -> DomainResult<Option<Complaint>> {
        let found = complaint::Entity::find_by_id(id).one(runner).await?;
        Ok(found.map(Into::into))
    }

    async fn get_with_refs<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<ComplaintWithRefs>> {
        let Some(found) = complaint::Entity::find_by_id(id).one(runner).await? else {
            return Ok(None);
        };
        let mut items = Self::with_refs(runner, vec![found]).await?;
        Ok(items.pop())
    }

    async fn get_detail<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
    ) -> DomainResult<Option<ComplaintDetail>> {
        let Some(found) = complaint::Entity::find_by_id(id).one(runner).await? else {
            return Ok(None);
        };

        let complainant = customer::Entity::find_by_id(found.customer_id)
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

        let technician = match found.technician_id {
            Some(technician_id) => technician_ref_map(runner, &[technician_id])
                .await?
                .remove(&technician_id),
            None => None,
        };

        Ok(Some(ComplaintDetail {
            complaint: found.into(),
            customer: complainant.into(),
            service: unit.into(),
            technician,
        }))
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        runner: &C,
        complaint: Complaint,
    ) -> DomainResult<Complaint> {
        let _ = mapper::complaint_to_active_model(&complaint)
            .insert(runner)
            .await?;
        Ok(complaint)
    }

    async fn update<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        patch: &ComplaintPatch,
    ) -> DomainResult<Option<Complaint>> {
        let result = complaint::Entity::update_many()
            .set(mapper::complaint_patch_to_active_model(patch))
            .filter(complaint::Column::Id.eq(id))
            .exec(runner)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(runner, id).await
    }

    async fn assign<C: ConnectionTrait>(
        &self,
        runner: &C,
        id: Uuid,
        technician_id: Uuid,
    ) -> DomainResult<Option<Complaint>> {
        let am = complaint::ActiveModel {
            technician_id: Set(Some(technician_id)),
            status: Set(ComplaintStatus::InProgress),
            ..Default::default()
        };
        let result = complaint::Entity::update_many()
            .set(am)
            .filter(complaint::Column::Id.eq(id))
            .exec(runner)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get(runner, id).await
    }

    async fn status_counts<C: ConnectionTrait>(
        &self,
        runner: &C,
    ) -> DomainResult<Vec<(ComplaintStatus, u64)>> {
        let rows: Vec<(ComplaintStatus, i64)> = complaint::Entity::find()
            .select_only()
            .column(complaint::Column::Status)
            .column_as(complaint::Column::Id.count(), "count")
            .group_by(complaint::Column::Status)
            .into_tuple()
            .all(runner)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(status, n)| (status, u64::try_from(n).unwrap_or_default()))
            .collect())
    }

    async fn recent_with_refs<C: ConnectionTrait>(
        &self,
        runner: &C,
        limit: u64,
    ) -> DomainResult<Vec<RecentComplaint>> {
        let rows = complaint::Entity::find()
            .order_by(complaint::Column::CreatedAt, Order::Desc)
            .order_by(complaint::Column::Id, Order::Desc)
            .limit(limit)
            .all(runner)
            .await?;

        let customer_ids: Vec<Uuid> = rows.iter().map(|m| m.customer_id).collect();
        let service_ids: Vec<Uuid> = rows.iter().map(|m| m.service_id).collect();
        let names = customer_name_map(runner, &customer_ids).await?;
        let services = service_ref_map(runner, &service_ids).await?;

        rows.into_iter()
            .map(|m| {
                let customer_name = require_ref(&names, m.customer_id, "customer")?;
                let service = require_ref(&services, m.service_id, "service")?;
                Ok(RecentComplaint {
                    complaint: m.into(),
                    customer_name,
                    service_type: service.service_type,
                })
            })
            .collect()
    }
}
