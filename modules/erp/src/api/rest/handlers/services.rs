use std::sync::Arc;

use aquaserve_auth::{Authn, Role};
use aquaserve_http::{ApiJson, ApiPath, ApiQuery, ApiResult, ErrorBody};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateServiceRequest, ServiceCreatedDto, ServiceDetailDto, ServiceDto, ServiceListItemDto,
    ServiceListParams, ServiceListResponse, SuccessResponse, UpdateServiceRequest,
};
use crate::module::ServicesSvc;

/// GET /services - All installed units, optionally for one customer.
#[utoipa::path(
    get,
    path = "/services",
    tag = "services",
    params(ServiceListParams),
    responses(
        (status = 200, description = "Installed services, newest first, with owner and reference counts", body = ServiceListResponse),
        (status = 401, description = "No session", body = ErrorBody)
    )
)]
pub async fn list_services(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ServicesSvc>>,
    ApiQuery(filter): ApiQuery<ServiceListParams>,
) -> ApiResult<Json<ServiceListResponse>> {
    let rows = svc.list(&session, filter.customer_id).await?;
    Ok(Json(ServiceListResponse {
        data: rows.into_iter().map(ServiceListItemDto::from).collect(),
    }))
}

/// GET /services/{id} - Service with its contracts and complaints.
#[utoipa::path(
    get,
    path = "/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Service with owner, contracts and recent complaints", body = ServiceDetailDto),
        (status = 404, description = "Unknown service", body = ErrorBody)
    )
)]
pub async fn get_service(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ServicesSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<ServiceDetailDto>> {
    let detail = svc.get(&session, id).await?;
    Ok(Json(detail.into()))
}

/// POST /services - Register an installed unit.
#[utoipa::path(
    post,
    path = "/services",
    tag = "services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceCreatedDto),
        (status = 404, description = "Unknown customer", body = ErrorBody)
    )
)]
pub async fn create_service(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ServicesSvc>>,
    ApiJson(req): ApiJson<CreateServiceRequest>,
) -> ApiResult<(StatusCode, Json<ServiceCreatedDto>)> {
    session.require_role(&[Role::Admin, Role::Support])?;
    let created = svc.create(&session, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /services/{id} - Partially update a service.
#[utoipa::path(
    put,
    path = "/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path)),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Updated service", body = ServiceDto),
        (status = 404, description = "Unknown service", body = ErrorBody)
    )
)]
pub async fn update_service(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ServicesSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateServiceRequest>,
) -> ApiResult<Json<ServiceDto>> {
    session.require_role(&[Role::Admin, Role::Support])?;
    let updated = svc.update(&session, id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// DELETE /services/{id} - Remove a service without dependents.
#[utoipa::path(
    delete,
    path = "/services/{id}",
    tag = "services",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Service deleted", body = SuccessResponse),
        (status = 409, description = "Contracts or complaints still reference the service", body = ErrorBody)
    )
)]
pub async fn delete_service(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<ServicesSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    session.require_role(&[Role::Admin])?;
    svc.delete(&session, id).await?;
    Ok(Json(SuccessResponse::default()))
}
