use std::sync::Arc;

use aquaserve_auth::{Authn, Role};
use aquaserve_http::{ApiJson, ApiPath, ApiQuery, ApiResult, ErrorBody, Page, PageParams};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::api::rest::dto::{
    CreatePaymentRequest, PaymentCreatedDto, PaymentDetailDto, PaymentDto, PaymentListItemDto,
    PaymentListParams, PaymentStatsDto, UpdatePaymentRequest,
};
use crate::domain::model::PaymentListQuery;
use crate::module::PaymentsSvc;

/// GET /payments - Paginated payments, newest first.
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    params(PageParams, PaymentListParams),
    responses(
        (status = 200, description = "One page of payments with payer and contract projections", body = Page<PaymentListItemDto>),
        (status = 401, description = "No session", body = ErrorBody)
    )
)]
pub async fn list_payments(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<PaymentsSvc>>,
    ApiQuery(page): ApiQuery<PageParams>,
    ApiQuery(filter): ApiQuery<PaymentListParams>,
) -> ApiResult<Json<Page<PaymentListItemDto>>> {
    let query = PaymentListQuery {
        status: filter.status,
        customer_id: filter.customer_id,
    };
    let page = svc.list(&session, &query, page).await?;
    Ok(Json(page.map(PaymentListItemDto::from)))
}

/// GET /payments/stats - Revenue KPIs and recent transactions.
#[utoipa::path(
    get,
    path = "/payments/stats",
    tag = "payments",
    responses(
        (status = 200, description = "Revenue totals, month-over-month change and recent payments", body = PaymentStatsDto),
        (status = 403, description = "Requires ADMIN or FINANCE", body = ErrorBody)
    )
)]
pub async fn payment_stats(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<PaymentsSvc>>,
) -> ApiResult<Json<PaymentStatsDto>> {
    session.require_role(&[Role::Admin, Role::Finance])?;
    let stats = svc.stats(&session).await?;
    Ok(Json(stats.into()))
}

/// GET /payments/{id} - Payment with payer, contract and ledger entry.
#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Payment with its customer, contract and finance log", body = PaymentDetailDto),
        (status = 404, description = "Unknown payment", body = ErrorBody)
    )
)]
pub async fn get_payment(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<PaymentsSvc>>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<PaymentDetailDto>> {
    let detail = svc.get(&session, id).await?;
    Ok(Json(detail.into()))
}

/// POST /payments - Record a paid payment plus its income ledger entry.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded as PAID with a matching INCOME ledger entry", body = PaymentCreatedDto),
        (status = 400, description = "Non-positive amount", body = ErrorBody),
        (status = 404, description = "Unknown customer or contract", body = ErrorBody)
    )
)]
pub async fn create_payment(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<PaymentsSvc>>,
    ApiJson(req): ApiJson<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<PaymentCreatedDto>)> {
    session.require_role(&[Role::Admin, Role::Finance])?;
    let created = svc.create(&session, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /payments/{id} - Change a payment's status.
#[utoipa::path(
    put,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = Uuid, Path)),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated payment", body = PaymentDto),
        (status = 404, description = "Unknown payment", body = ErrorBody)
    )
)]
pub async fn update_payment(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<PaymentsSvc>>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdatePaymentRequest>,
) -> ApiResult<Json<PaymentDto>> {
    session.require_role(&[Role::Admin, Role::Finance])?;
    let updated = svc.update(&session, id, &req.into()).await?;
    Ok(Json(updated.into()))
}
