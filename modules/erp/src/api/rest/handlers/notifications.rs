use std::sync::Arc;

use aquaserve_auth::Authn;
use aquaserve_http::{ApiError, ApiJson, ApiQuery, ApiResult, ErrorBody};
use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;

use crate::api::rest::dto::{
    CreateNotificationRequest, MarkReadRequest, NotificationDto, NotificationListItemDto,
    NotificationListParams, NotificationsMarkedResponse,
};
use crate::domain::model::NewNotification;
use crate::module::NotificationsSvc;

/// GET /notifications - Newest-first feed, as a bare array.
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    params(NotificationListParams),
    responses(
        (status = 200, description = "Notifications with the customer projection, newest first", body = [NotificationListItemDto]),
        (status = 401, description = "No session", body = ErrorBody)
    )
)]
pub async fn list_notifications(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<NotificationsSvc>>,
    ApiQuery(filter): ApiQuery<NotificationListParams>,
) -> ApiResult<Json<Vec<NotificationListItemDto>>> {
    let rows = svc
        .list(
            &session,
            filter.customer_id,
            filter.unread.unwrap_or(false),
            filter.limit,
        )
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /notifications - Append a notification for a customer.
#[utoipa::path(
    post,
    path = "/notifications",
    tag = "notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = NotificationDto),
        (status = 400, description = "A required field is missing or empty", body = ErrorBody),
        (status = 404, description = "Unknown customer", body = ErrorBody)
    )
)]
pub async fn create_notification(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<NotificationsSvc>>,
    ApiJson(req): ApiJson<CreateNotificationRequest>,
) -> ApiResult<(StatusCode, Json<NotificationDto>)> {
    // One blanket message for any gap, like the original API.
    let (Some(customer_id), Some(kind), Some(message)) = (req.customer_id, req.kind, req.message)
    else {
        return Err(ApiError::validation("Missing required fields"));
    };
    if kind.is_empty() || message.is_empty() {
        return Err(ApiError::validation("Missing required fields"));
    }

    let created = svc
        .create(
            &session,
            NewNotification {
                customer_id,
                kind,
                message,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PATCH /notifications - Mark a batch of notifications read.
#[utoipa::path(
    patch,
    path = "/notifications",
    tag = "notifications",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Rows marked read; unknown ids are skipped", body = NotificationsMarkedResponse),
        (status = 400, description = "Body lacks an ids array", body = ErrorBody)
    )
)]
pub async fn mark_notifications_read(
    Authn(session): Authn,
    Extension(svc): Extension<Arc<NotificationsSvc>>,
    ApiJson(req): ApiJson<MarkReadRequest>,
) -> ApiResult<Json<NotificationsMarkedResponse>> {
    let Some(ids) = req.ids else {
        return Err(ApiError::validation("Invalid notification IDs"));
    };
    let updated = svc.mark_read(&session, &ids).await?;
    Ok(Json(NotificationsMarkedResponse {
        success: true,
        updated,
    }))
}
