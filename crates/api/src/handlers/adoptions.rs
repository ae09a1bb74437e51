//! Handlers for the `/adoptions` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waggytail_core::adoption::validate_admin_status;
use waggytail_core::error::CoreError;
use waggytail_core::notifications::KIND_ADOPTION;
use waggytail_core::roles::ROLE_USER;
use waggytail_core::types::DbId;
use waggytail_db::models::adoption::{Adoption, AdoptionListing};
use waggytail_db::models::notification::CreateNotification;
use waggytail_db::repositories::{AdoptionRepo, DogRepo, NotificationRepo, UserRepo};
use waggytail_events::OutboundEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /adoptions`.
#[derive(Debug, Deserialize)]
pub struct CreateInquiryRequest {
    pub dog_id: DbId,
    pub message: String,
}

/// Request body for `POST /adoptions/{id}/reply`.
#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
}

/// Request body for `PUT /adoptions/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/adoptions
///
/// Record the caller's interest in a dog. One open inquiry per
/// (user, dog) pair; a duplicate surfaces as 409 via the unique
/// constraint.
pub async fn create_inquiry(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateInquiryRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Adoption>>)> {
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "message is required".into(),
        )));
    }

    if DogRepo::find_by_id(&state.pool, input.dog_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Dog",
            id: input.dog_id,
        }));
    }

    let inquiry =
        AdoptionRepo::create(&state.pool, input.dog_id, auth.user_id, &input.message).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(inquiry))))
}

/// GET /api/v1/adoptions
///
/// All inquiries with names expanded. Admin only.
pub async fn list_all(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdoptionListing>>>> {
    let inquiries = AdoptionRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(inquiries)))
}

/// GET /api/v1/adoptions/pending
///
/// Pending inquiries, oldest first. Admin only.
pub async fn list_pending(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdoptionListing>>>> {
    let inquiries = AdoptionRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse::new(inquiries)))
}

/// GET /api/v1/adoptions/mine
///
/// The caller's own inquiries.
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdoptionListing>>>> {
    let inquiries = AdoptionRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse::new(inquiries)))
}

/// GET /api/v1/adoptions/lookup/{user_id}/{dog_id}
///
/// Existence probe: the inquiry a user has open against a dog, if any.
pub async fn lookup(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((user_id, dog_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Option<Adoption>>>> {
    let inquiry = AdoptionRepo::find_by_user_and_dog(&state.pool, user_id, dog_id).await?;
    Ok(Json(DataResponse::new(inquiry)))
}

/// POST /api/v1/adoptions/{id}/reply
///
/// Record a staff reply, notify the inquirer, and attempt a best-effort
/// email. Admin only.
pub async fn reply(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReplyRequest>,
) -> AppResult<Json<DataResponse<Adoption>>> {
    if input.message.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "message is required".into(),
        )));
    }

    let inquiry = AdoptionRepo::reply(&state.pool, id, &input.message)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Adoption",
            id,
        }))?;

    let dog_name = DogRepo::find_by_id(&state.pool, inquiry.dog_id)
        .await?
        .map(|d| d.name)
        .unwrap_or_else(|| "the dog".to_string());

    NotificationRepo::create(
        &state.pool,
        &CreateNotification::targeted(
            inquiry.user_id,
            KIND_ADOPTION,
            format!("We've replied to your adoption inquiry about {dog_name}"),
        )
        .with_dog(inquiry.dog_id),
    )
    .await?;

    if let Some(user) = UserRepo::find_by_id(&state.pool, inquiry.user_id).await? {
        state
            .mailer
            .send(OutboundEmail::adoption_reply(
                &user.email,
                &user.name,
                &dog_name,
                &input.message,
            ))
            .await;
    }

    Ok(Json(DataResponse::new(inquiry)))
}

/// PUT /api/v1/adoptions/{id}
///
/// Set the inquiry status to Approved or Rejected. Admin only.
pub async fn update_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<DataResponse<Adoption>>> {
    validate_admin_status(&input.status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let inquiry = AdoptionRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Adoption",
            id,
        }))?;

    Ok(Json(DataResponse::new(inquiry)))
}

/// DELETE /api/v1/adoptions/{id}
///
/// Withdraw an inquiry. Plain users may only delete their own.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let inquiry = AdoptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Adoption",
            id,
        }))?;

    if auth.role == ROLE_USER && inquiry.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only withdraw your own inquiries".into(),
        )));
    }

    AdoptionRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
