//! Handlers for the `/notifications` resource.
//!
//! The feed is append-only. Listing is scoped to the caller: targeted
//! rows addressed to them plus broadcasts matching their role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waggytail_core::error::CoreError;
use waggytail_core::notifications::KIND_ANNOUNCEMENT;
use waggytail_core::roles::validate_role;
use waggytail_core::types::DbId;
use waggytail_db::models::notification::{CreateNotification, Notification};
use waggytail_db::repositories::NotificationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

/// Request body for `POST /notifications/announce`.
#[derive(Debug, Deserialize)]
pub struct AnnounceRequest {
    /// Target role filter; `all` reaches everyone.
    pub role: String,
    pub message: String,
}

/// GET /api/v1/notifications
///
/// The caller's notification feed, newest first.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Notification>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let notifications =
        NotificationRepo::list_for_caller(&state.pool, auth.user_id, &auth.role, limit, offset)
            .await?;

    Ok(Json(DataResponse::new(notifications)))
}

/// POST /api/v1/notifications/{id}/read
///
/// Mark a notification as read. Only the addressed recipient may mark a
/// targeted notification; broadcasts may be marked by any matching
/// caller. Returns 204 No Content.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let notification = NotificationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Notification",
            id,
        }))?;

    if let Some(recipient_id) = notification.recipient_id {
        if recipient_id != auth.user_id {
            return Err(AppError::Core(CoreError::Forbidden(
                "This notification is addressed to another user".into(),
            )));
        }
    }

    NotificationRepo::mark_read(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/notifications/unread-count
///
/// Number of unread notifications visible to the caller.
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let count = NotificationRepo::unread_count(&state.pool, auth.user_id, &auth.role).await?;
    Ok(Json(DataResponse::new(serde_json::json!({ "count": count }))))
}

/// POST /api/v1/notifications/announce
///
/// Broadcast an announcement to every user with the given role. Admin
/// only.
pub async fn announce(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AnnounceRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Notification>>)> {
    if input.role != waggytail_core::notifications::ROLE_ALL {
        validate_role(&input.role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "message is required".into(),
        )));
    }

    let notification = NotificationRepo::create(
        &state.pool,
        &CreateNotification::broadcast(&input.role, KIND_ANNOUNCEMENT, input.message),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(notification))))
}
