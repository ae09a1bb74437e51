//! Handlers for the `/dogs` resource.
//!
//! Dogs are admin-managed inventory; everyone authenticated may browse.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use waggytail_core::dogs::{validate_size, validate_status};
use waggytail_core::error::CoreError;
use waggytail_core::types::DbId;
use waggytail_db::models::dog::{CreateDog, Dog, UpdateDog};
use waggytail_db::repositories::DogRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dogs
pub async fn list_dogs(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Dog>>>> {
    let dogs = DogRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(dogs)))
}

/// GET /api/v1/dogs/{id}
pub async fn get_dog(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Dog>>> {
    let dog = DogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dog", id }))?;
    Ok(Json(DataResponse::new(dog)))
}

/// POST /api/v1/dogs
///
/// Add a dog to the inventory. Admin only.
pub async fn create_dog(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateDog>,
) -> AppResult<(StatusCode, Json<DataResponse<Dog>>)> {
    validate_size(&input.size).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    if let Some(status) = &input.status {
        validate_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let dog = DogRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(dog))))
}

/// PUT /api/v1/dogs/{id}
///
/// Update a dog. Admin only.
pub async fn update_dog(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDog>,
) -> AppResult<Json<DataResponse<Dog>>> {
    if let Some(size) = &input.size {
        validate_size(size).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    if let Some(status) = &input.status {
        validate_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }

    let dog = DogRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dog", id }))?;
    Ok(Json(DataResponse::new(dog)))
}

/// DELETE /api/v1/dogs/{id}
///
/// Remove a dog from the inventory. Admin only. Returns 204 No Content.
pub async fn delete_dog(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = DogRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Dog", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
