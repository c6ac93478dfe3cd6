use std::sync::Arc;

use aquaserve_auth::{Authn, Role};
use aquaserve_http::{ApiJson, ApiPath, ApiQuery, ApiResult, ErrorBody, Page, PageParams};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::rest::dto::{
    AmcCreatedDto, AmcDetailDto, AmcDto, AmcListItemDto, AmcListParams, AmcRenewedResponse,
    CreateAmcRequest, RenewAmcRequest, SuccessResponse, UpdateAmcRequest,
};
use crate::domain::model::AmcListQuery;
use crate::module::AmcSvc;

/// GET /amc - Paginated contracts, soonest end date first.
#[utoipa::path(
    get,
    path = "/amc",
    tag = "amc",
    params(PageParams, AmcListParams),
    responses(
        (status = 200, description = "One page of contracts ordered by end date ascending", body = Page<AmcListItemDto>),
        (status = 401, description = "No session", body = ErrorBody)
    )
)]
pub async fn list_contracts(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<AmcSvc>>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<AmcListParams>,
) -> ApiResult<Json<Page<AmcListItemDto>>> {
    let query = AmcListQuery {
        status: filter.status,
        customer_id: filter.customer_id,
    };
    let page = svc.list(&session, &query, page).await?;
    Ok(Json(page.map(AmcListItemDto::from)))
}

/// GET /amc/{id} - Contract with customer, service and payments.
#[utoipa::path(
    get,
    path = "/amc/{id}",
    tag = "amc",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Contract with its customer, service and payment history", body = AmcDetailDto),
        (status = 404, description = "Unknown contract", body = ErrorBody)
    )
)]
pub async fn get_contract(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<AmcSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<AmcDetailDto>> {
    let detail = svc.get(&session, id).await?;
    Ok(Json(detail.into()))
}

/// POST /amc - Open a contract; status starts ACTIVE.
#[utoipa::path(
    post,
    path = "/amc",
    tag = "amc",
    request_body = CreateAmcRequest,
    responses(
        (status = 201, description = "Contract created", body = AmcCreatedDto),
        (status = 400, description = "Non-positive amount", body = ErrorBody),
        (status = 404, description = "Unknown customer or service", body = ErrorBody)
    )
)]
pub async fn create_contract(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<AmcSvc>>,
    ApiJson(req): ApiJson<CreateAmcRequest>,
) -> ApiResult<(StatusCode, Json<AmcCreatedDto>)> {
    session.require_role(&[Role::Admin, Role::Finance])?;
    let created = svc.create(&session, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /amc/{id} - Partially update a contract.
#[utoipa::path(
    put,
    path = "/amc/{id}",
    tag = "amc",
    params(("id" = Uuid, Path)),
    request_body = UpdateAmcRequest,
    responses(
        (status = 200, description = "Updated contract", body = AmcDto),
        (status = 404, description = "Unknown contract", body = ErrorBody)
    )
)]
pub async fn update_contract(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<AmcSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateAmcRequest>,
) -> ApiResult<Json<AmcDto>> {
    session.require_role(&[Role::Admin, Role::Finance])?;
    let updated = svc.update(&session, id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// POST /amc/{id}/renew - Extend a contract by whole months.
///
/// The body is optional; omitting it renews by the default twelve months.
#[utoipa::path(
    post,
    path = "/amc/{id}/renew",
    tag = "amc",
    params(("id" = Uuid, Path)),
    request_body = RenewAmcRequest,
    responses(
        (status = 200, description = "Contract extended and reactivated", body = AmcRenewedResponse),
        (status = 400, description = "Months outside 1 to 36", body = ErrorBody),
        (status = 404, description = "Unknown contract", body = ErrorBody)
    )
)]
pub async fn renew_contract(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<AmcSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<ApiJson<RenewAmcRequest>>,
) -> ApiResult<Json<AmcRenewedResponse>> {
    session.require_role(&[Role::Admin, Role::Finance])?;
    let months = body.and_then(|ApiJson(req)| req.months);
    let renewed = svc.renew(&session, id, months).await?;
    Ok(Json(AmcRenewedResponse {
        message: "Contract renewed successfully".to_owned(),
        contract: renewed.into(),
    }))
}

/// DELETE /amc/{id} - Remove a contract, detaching its payments.
#[utoipa::path(
    delete,
    path = "/amc/{id}",
    tag = "amc",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Contract deleted, payment history kept", body = SuccessResponse),
        (status = 403, description = "Requires ADMIN", body = ErrorBody),
        (status = 404, description = "Unknown contract", body = ErrorBody)
    )
)]
pub async fn delete_contract(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<AmcSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    session.require_role(&[Role::Admin])?;
    svc.delete(&session, id).await?;
    Ok(Json(SuccessResponse::default()))
}
