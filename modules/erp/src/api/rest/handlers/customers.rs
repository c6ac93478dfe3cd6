use std::sync::Arc;

use aquaserve_auth::{Authn, Role};
use aquaserve_http::{ApiJson, ApiPath, ApiQuery, ApiResult, ErrorBody, Page, PageParams};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateCustomerRequest, CustomerDetailDto, CustomerDto, CustomerListItemDto, CustomerListParams,
    SuccessResponse, UpdateCustomerRequest,
};
use crate::domain::model::CustomerListQuery;
use crate::module::CustomersSvc;

/// GET /customers - Paginated customer directory.
#[utoipa::path(
    get,
    path = "/customers",
    tag = "customers",
    params(PageParams, CustomerListParams),
    responses(
        (status = 200, description = "One page of customers, newest first, each with dependent-record counts", body = Page<CustomerListItemDto>),
        (status = 401, description = "No session", body = ErrorBody)
    )
)]
pub async fn list_customers(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<CustomersSvc>>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<CustomerListParams>,
) -> ApiResult<Json<Page<CustomerListItemDto>>> {
    let query = CustomerListQuery {
        search: filter.search,
    };
    let page = svc.list(&session, &query, page).await?;
    Ok(Json(page.map(CustomerListItemDto::from)))
}

/// GET /customers/{id} - Customer with related records.
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Customer with services, contracts, recent payments and complaints", body = CustomerDetailDto),
        (status = 404, description = "Unknown customer", body = ErrorBody)
    )
)]
pub async fn get_customer(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<CustomersSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<CustomerDetailDto>> {
    let detail = svc.get(&session, id).await?;
    Ok(Json(detail.into()))
}

/// POST /customers - Register a customer.
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerDto),
        (status = 400, description = "First violated field rule", body = ErrorBody),
        (status = 403, description = "Requires ADMIN or SUPPORT", body = ErrorBody)
    )
)]
pub async fn create_customer(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<CustomersSvc>>,
    ApiJson(req): ApiJson<CreateCustomerRequest>,
) -> ApiResult<(StatusCode, Json<CustomerDto>)> {
    session.require_role(&[Role::Admin, Role::Support])?;
    let created = svc.create(&session, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /customers/{id} - Partially update a customer.
#[utoipa::path(
    put,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path)),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Updated customer", body = CustomerDto),
        (status = 404, description = "Unknown customer", body = ErrorBody)
    )
)]
pub async fn update_customer(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<CustomersSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateCustomerRequest>,
) -> ApiResult<Json<CustomerDto>> {
    session.require_role(&[Role::Admin, Role::Support])?;
    let updated = svc.update(&session, id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// DELETE /customers/{id} - Remove a customer without dependents.
#[utoipa::path(
    delete,
    path = "/customers/{id}",
    tag = "customers",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Customer deleted", body = SuccessResponse),
        (status = 403, description = "Requires ADMIN", body = ErrorBody),
        (status = 409, description = "Dependent records still reference the customer", body = ErrorBody)
    )
)]
pub async fn delete_customer(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<CustomersSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    session.require_role(&[Role::Admin])?;
    svc.delete(&session, id).await?;
    Ok(Json(SuccessResponse::default()))
}
