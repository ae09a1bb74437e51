//! Handlers for the `/users` resource (profile and user management).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waggytail_core::error::CoreError;
use waggytail_core::roles::validate_role;
use waggytail_core::types::DbId;
use waggytail_db::models::user::{UpdateProfile, UserResponse};
use waggytail_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireMarshal};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /users`.
#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    /// Filter by role name. When absent, all users are returned.
    pub role: Option<String>,
}

/// GET /api/v1/users/me
///
/// The authenticated user's own profile, including cross-reference lists.
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse::new(user.into())))
}

/// PUT /api/v1/users/me
///
/// Update the authenticated user's profile (name, phone, date of birth,
/// waiver flag). Email and role are not editable here.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse::new(user.into())))
}

/// GET /api/v1/users?role=
///
/// List users, optionally filtered by role. Marshal/admin only.
pub async fn list_users(
    RequireMarshal(_caller): RequireMarshal,
    State(state): State<AppState>,
    Query(params): Query<UserListQuery>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = match &params.role {
        Some(role) => {
            validate_role(role).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
            UserRepo::list_by_role(&state.pool, role).await?
        }
        None => UserRepo::list(&state.pool).await?,
    };

    let responses = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(DataResponse::new(responses)))
}

/// DELETE /api/v1/users/{id}
///
/// Remove a user account. Admin only. Returns 204 No Content.
pub async fn delete_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
