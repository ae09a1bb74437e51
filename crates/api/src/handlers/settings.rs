//! Handlers for the `/settings` resource.

use axum::extract::State;
use axum::Json;
use waggytail_core::error::CoreError;
use waggytail_db::models::restricted_dates::{
    RestrictedDateSettings, UpdateRestrictedDateSettings,
};
use waggytail_db::repositories::SettingsRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings/restrictions
///
/// The restricted-dates settings, created with defaults on first read.
pub async fn get_restrictions(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<RestrictedDateSettings>>> {
    let settings = SettingsRepo::get_or_create(&state.pool).await?;
    Ok(Json(DataResponse::new(settings)))
}

/// PUT /api/v1/settings/restrictions
///
/// Update the restricted-dates settings. Admin only.
pub async fn update_restrictions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateRestrictedDateSettings>,
) -> AppResult<Json<DataResponse<RestrictedDateSettings>>> {
    if let Some(days) = &input.closed_days {
        if days.iter().any(|d| !(1..=7).contains(d)) {
            return Err(AppError::Core(CoreError::Validation(
                "closed_days must be ISO weekday numbers (1-7)".into(),
            )));
        }
    }

    let settings = SettingsRepo::update(&state.pool, &input).await?;
    Ok(Json(DataResponse::new(settings)))
}
