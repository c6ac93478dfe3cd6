use std::sync::Arc;

use aquaserve_auth::{Authn, Role};
use aquaserve_http::{ApiResult, ErrorBody};
use axum::extract::Extension;
use axum::Json;

use crate::api::rest::dto::DashboardStatsDto;
use crate::module::DashboardSvc;

/// GET /dashboard/stats - Aggregates for the overview screen.
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Counts, revenue figures and recent activity", body = DashboardStatsDto),
        (status = 403, description = "Requires ADMIN, FINANCE or SUPPORT", body = ErrorBody)
    )
)]
pub async fn dashboard_stats(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<DashboardSvc>>,
) -> ApiResult<Json<DashboardStatsDto>> {
    session.require_role(&[Role::Admin, Role::Finance, Role::Support])?;
    let stats = svc.stats(&session).await?;
    Ok(Json(stats.into()))
}
