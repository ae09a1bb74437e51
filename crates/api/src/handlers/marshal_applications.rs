//! Handlers for the `/marshal-applications` resource.
//!
//! Approval here is the only workflow that promotes a user to marshal.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use waggytail_core::applications::{validate_decision, STATUS_APPROVED};
use waggytail_core::error::CoreError;
use waggytail_core::notifications::KIND_MARSHAL_APPLICATION;
use waggytail_core::roles::ROLE_MARSHAL;
use waggytail_core::types::DbId;
use waggytail_db::models::marshal_application::{ApplicationListing, MarshalApplication};
use waggytail_db::models::notification::CreateNotification;
use waggytail_db::repositories::{MarshalApplicationRepo, NotificationRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /marshal-applications`.
#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub message: Option<String>,
}

/// Request body for `PUT /marshal-applications/{id}`.
#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub status: String,
}

/// POST /api/v1/marshal-applications
///
/// Apply to become a marshal. At most one pending application per user.
pub async fn apply(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<ApplyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<MarshalApplication>>)> {
    if MarshalApplicationRepo::has_pending(&state.pool, auth.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "You already have a pending application".into(),
        )));
    }

    let application =
        MarshalApplicationRepo::create(&state.pool, auth.user_id, input.message.as_deref()).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(application))))
}

/// GET /api/v1/marshal-applications
///
/// All applications with applicant details. Admin only.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ApplicationListing>>>> {
    let applications = MarshalApplicationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(applications)))
}

/// PUT /api/v1/marshal-applications/{id}
///
/// Record a decision. Approval promotes the applicant to marshal; both
/// outcomes notify the applicant.
pub async fn decide(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<DecisionRequest>,
) -> AppResult<Json<DataResponse<MarshalApplication>>> {
    validate_decision(&input.status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let application = MarshalApplicationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MarshalApplication",
            id,
        }))?;

    if application.status != waggytail_core::applications::STATUS_PENDING {
        return Err(AppError::Core(CoreError::Conflict(
            "This application has already been decided".into(),
        )));
    }

    let updated = MarshalApplicationRepo::decide(&state.pool, id, &input.status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MarshalApplication",
            id,
        }))?;

    let message = if input.status == STATUS_APPROVED {
        UserRepo::set_role(&state.pool, application.user_id, ROLE_MARSHAL).await?;
        "Your marshal application was approved. Welcome to the team!"
    } else {
        "Your marshal application was not approved this time."
    };

    NotificationRepo::create(
        &state.pool,
        &CreateNotification::targeted(application.user_id, KIND_MARSHAL_APPLICATION, message),
    )
    .await?;

    Ok(Json(DataResponse::new(updated)))
}
