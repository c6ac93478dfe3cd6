use std::sync::Arc;

use aquaserve_auth::{Authn, Role};
use aquaserve_http::{ApiJson, ApiPath, ApiQuery, ApiResult, ErrorBody, Page, PageParams};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::rest::dto::{
    AssignComplaintRequest, ComplaintAssignedDto, ComplaintCreatedDto, ComplaintDetailDto,
    ComplaintListItemDto, ComplaintListParams, ComplaintUpdatedDto, CreateComplaintRequest,
    UpdateComplaintRequest,
};
use crate::domain::model::ComplaintListQuery;
use crate::module::ComplaintsSvc;

/// GET /complaints - Paginated complaints, newest first.
///
/// A TECHNICIAN session only ever sees its own assignments.
#[utoipa::path(
    get,
    path = "/complaints",
    tag = "complaints",
    params(PageParams, ComplaintListParams),
    responses(
        (status = 200, description = "One page of complaints with customer, service and technician projections", body = Page<ComplaintListItemDto>),
        (status = 401, description = "No session", body = ErrorBody)
    )
)]
pub async fn list_complaints(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ComplaintsSvc>>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<ComplaintListParams>,
) -> ApiResult<Json<Page<ComplaintListItemDto>>> {
    let query = ComplaintListQuery {
        status: filter.status,
        customer_id: filter.customer_id,
        technician_id: None,
    };
    let page = svc.list(&session, query, page).await?;
    Ok(Json(page.map(ComplaintListItemDto::from)))
}

/// GET /complaints/{id} - Complaint with customer, service, technician.
#[utoipa::path(
    get,
    path = "/complaints/{id}",
    tag = "complaints",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Complaint detail", body = ComplaintDetailDto),
        (status = 403, description = "Technician not assigned to this complaint", body = ErrorBody),
        (status = 404, description = "Unknown complaint", body = ErrorBody)
    )
)]
pub async fn get_complaint(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ComplaintsSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ComplaintDetailDto>> {
    let detail = svc.get(&session, id).await?;
    Ok(Json(detail.into()))
}

/// POST /complaints - Register a complaint and notify the customer.
#[utoipa::path(
    post,
    path = "/complaints",
    tag = "complaints",
    request_body = CreateComplaintRequest,
    responses(
        (status = 201, description = "Complaint registered, ticket notification appended", body = ComplaintCreatedDto),
        (status = 400, description = "Description outside 10 to 1000 characters", body = ErrorBody),
        (status = 404, description = "Unknown customer or service", body = ErrorBody)
    )
)]
pub async fn create_complaint(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ComplaintsSvc>>,
    ApiJson(req): ApiJson<CreateComplaintRequest>,
) -> ApiResult<(StatusCode, Json<ComplaintCreatedDto>)> {
    session.require_role(&[Role::Admin, Role::Support])?;
    let created = svc.create(&session, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /complaints/{id} - Update a complaint; PATCH is an alias.
///
/// Technicians may only change the status of their own complaints; a
/// status change notifies the customer in the same transaction.
#[utoipa::path(
    put,
    path = "/complaints/{id}",
    tag = "complaints",
    params(("id" = Uuid, Path)),
    request_body = UpdateComplaintRequest,
    responses(
        (status = 200, description = "Updated complaint", body = ComplaintUpdatedDto),
        (status = 403, description = "Ownership or status-only rule violated", body = ErrorBody),
        (status = 404, description = "Unknown complaint", body = ErrorBody)
    )
)]
pub async fn update_complaint(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ComplaintsSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateComplaintRequest>,
) -> ApiResult<Json<ComplaintUpdatedDto>> {
    let updated = svc.update(&session, id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// POST /complaints/{id}/assign - Hand a complaint to a technician.
#[utoipa::path(
    post,
    path = "/complaints/{id}/assign",
    tag = "complaints",
    params(("id" = Uuid, Path)),
    request_body = AssignComplaintRequest,
    responses(
        (status = 200, description = "Technician assigned, status forced to IN_PROGRESS", body = ComplaintAssignedDto),
        (status = 400, description = "Target user missing or not a technician", body = ErrorBody),
        (status = 404, description = "Unknown complaint", body = ErrorBody)
    )
)]
pub async fn assign_complaint(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ComplaintsSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<AssignComplaintRequest>,
) -> ApiResult<Json<ComplaintAssignedDto>> {
    session.require_role(&[Role::Admin, Role::Support])?;
    let assigned = svc.assign(&session, id, req.technician_id).await?;
    Ok(Json(assigned.into()))
}
