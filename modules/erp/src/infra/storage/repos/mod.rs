//! SeaORM repository implementations.
//!
//! Related rows for list projections are batch-loaded by id instead of
//! joined, so every query stays on the typed entity API.

pub mod amc_sea_repo;
pub mod complaints_sea_repo;
pub mod customers_sea_repo;
pub mod finance_sea_repo;
pub mod notifications_sea_repo;
pub mod payments_sea_repo;
pub mod services_sea_repo;
pub mod users_sea_repo;

pub use amc_sea_repo::SeaOrmAmcRepository;
pub use complaints_sea_repo::SeaOrmComplaintsRepository;
pub use customers_sea_repo::SeaOrmCustomersRepository;
pub use finance_sea_repo::SeaOrmFinanceRepository;
pub use notifications_sea_repo::SeaOrmNotificationsRepository;
pub use payments_sea_repo::SeaOrmPaymentsRepository;
pub use services_sea_repo::SeaOrmServicesRepository;
pub use users_sea_repo::SeaOrmUsersRepository;

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::model::{AmcRef, CustomerRef, ServiceRef, TechnicianRef};
use crate::domain::{DomainError, DomainResult};

use super::entity::{amc, customer, service, user};

/// Customer projections for the given ids, keyed by id.
pub(crate) async fn customer_ref_map<C: ConnectionTrait>(
    runner: &C,
    ids: &[Uuid],
) -> DomainResult<HashMap<Uuid, CustomerRef>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = customer::Entity::find()
        .filter(customer::Column::Id.is_in(ids.iter().copied()))
        .all(runner)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            (
                m.id,
                CustomerRef {
                    id: m.id,
                    name: m.name,
                    phone: m.phone,
                },
            )
        })
        .collect())
}

/// Customer display names for the given ids, keyed by id.
pub(crate) async fn customer_name_map<C: ConnectionTrait>(
    runner: &C,
    ids: &[Uuid],
) -> DomainResult<HashMap<Uuid, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = customer::Entity::find()
        .filter(customer::Column::Id.is_in(ids.iter().copied()))
        .all(runner)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m.name)).collect())
}

/// Service projections for the given ids, keyed by id.
pub(crate) async fn service_ref_map<C: ConnectionTrait>(
    runner: &C,
    ids: &[Uuid],
) -> DomainResult<HashMap<Uuid, ServiceRef>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = service::Entity::find()
        .filter(service::Column::Id.is_in(ids.iter().copied()))
        .all(runner)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            (
                m.id,
                ServiceRef {
                    id: m.id,
                    service_type: m.service_type,
                },
            )
        })
        .collect())
}

/// Technician projections for the given staff ids, keyed by id.
pub(crate) async fn technician_ref_map<C: ConnectionTrait>(
    runner: &C,
    ids: &[Uuid],
) -> DomainResult<HashMap<Uuid, TechnicianRef>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = user::Entity::find()
        .filter(user::Column::Id.is_in(ids.iter().copied()))
        .all(runner)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            (
                m.id,
                TechnicianRef {
                    id: m.id,
                    name: m.name,
                    email: m.email,
                },
            )
        })
        .collect())
}

/// Contract projections for the given ids, keyed by id.
pub(crate) async fn amc_ref_map<C: ConnectionTrait>(
    runner: &C,
    ids: &[Uuid],
) -> DomainResult<HashMap<Uuid, AmcRef>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = amc::Entity::find()
        .filter(amc::Column::Id.is_in(ids.iter().copied()))
        .all(runner)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| {
            (
                m.id,
                AmcRef {
                    id: m.id,
                    status: m.status,
                },
            )
        })
        .collect())
}

/// Resolves a foreign key against a batch-loaded map. A miss means the row
/// dangles, which the schema forbids.
pub(crate) fn require_ref<T: Clone>(
    map: &HashMap<Uuid, T>,
    id: Uuid,
    what: &str,
) -> DomainResult<T> {
    map.get(&id)
        .cloned()
        .ok_or_else(|| DomainError::invariant(format!("dangling {what} reference: {id}")))
}

/// Runs a prepared `(group_id, count)` aggregation, returning a map with an
/// entry per group that has at least one row. `ids` is the key set the
/// caller filtered on; an empty set skips the query.
pub(crate) async fn grouped_counts<C: ConnectionTrait, E: EntityTrait>(
    runner: &C,
    select: sea_orm::Select<E>,
    ids: &[Uuid],
) -> DomainResult<HashMap<Uuid, u64>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows: Vec<(Uuid, i64)> = select.into_tuple().all(runner).await?;
    Ok(rows
        .into_iter()
        .map(|(id, n)| (id, u64::try_from(n).unwrap_or_default()))
        .collect())
}
