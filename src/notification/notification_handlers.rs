use super::{
    notification_dto::{CreateNotificationRequest, UpdateNotificationPreferencesRequest},
    notification_models::NotificationResponse,
};
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

/// Get all notifications for the authenticated user
#[utoipa::path(
    get,
    path = "/api/notifications",
    responses(
        (status = 200, description = "List of notifications in creation order", body = Vec<NotificationResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_repository
        .find_all_by_user(user_id)
        .await?;

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// Mark notification as read
///
/// Ownership is enforced here, not client-side: a notification belonging
/// to another user is rejected with 403 before anything is written.
#[utoipa::path(
    put,
    path = "/api/notifications/{id}/read",
    params(
        ("id" = Uuid, Path, description = "Notification ID")
    ),
    responses(
        (status = 200, description = "Notification marked as read", body = NotificationResponse),
        (status = 403, description = "Notification belongs to another user"),
        (status = 404, description = "Notification not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(notification_id): Path<Uuid>,
) -> Result<Json<NotificationResponse>> {
    let notification = state
        .notification_repository
        .find_by_id(notification_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    if notification.user_id != user_id {
        return Err(AppError::Forbidden(
            "Notification belongs to another user".to_string(),
        ));
    }

    let updated = state
        .notification_repository
        .mark_as_read(notification_id)
        .await?;

    Ok(Json(updated.into()))
}

/// Update notification preferences
#[utoipa::path(
    put,
    path = "/api/notifications/preferences",
    request_body = UpdateNotificationPreferencesRequest,
    responses(
        (status = 200, description = "Preferences updated"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn update_notification_preferences(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<UpdateNotificationPreferencesRequest>,
) -> Result<StatusCode> {
    state
        .user_repository
        .set_notification_enabled(user_id, payload.notification_enabled)
        .await?;

    Ok(StatusCode::OK)
}

/// Create a notification for a user (administrative)
#[utoipa::path(
    post,
    path = "/api/admin/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 403, description = "Admin access required"),
        (status = 404, description = "Target user not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "notifications",
    security(("bearer_auth" = []))
)]
pub async fn create_notification(
    State(state): State<AppState>,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<NotificationResponse>)> {
    payload.validate()?;

    state
        .user_repository
        .find_by_id(payload.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Target user not found".to_string()))?;

    let notification = state
        .notification_repository
        .create(
            payload.user_id,
            payload.title.as_deref(),
            &payload.message,
            payload.link.as_deref(),
            payload.kind,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(notification.into())))
}
