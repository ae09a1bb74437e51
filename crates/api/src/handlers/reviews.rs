//! Handlers for the `/reviews` resource.
//!
//! Reviews carry image URLs; the upload itself happens in an external
//! object-storage service, so the API only stores the resulting URLs.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use waggytail_core::error::CoreError;
use waggytail_core::roles::ROLE_USER;
use waggytail_core::types::DbId;
use waggytail_db::models::review::{Review, ReviewListing};
use waggytail_db::repositories::{DogRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default number of photo URLs returned by the photo wall.
const DEFAULT_PHOTO_LIMIT: i64 = 50;

/// Request body for `POST /dogs/{id}/reviews`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "star must be between 1 and 5"))]
    pub star: i16,
    #[validate(length(min = 1, message = "review text is required"))]
    pub review: String,
    pub images: Option<Vec<String>>,
}

/// Query parameters for `GET /reviews/photos`.
#[derive(Debug, Deserialize)]
pub struct PhotoQuery {
    pub limit: Option<i64>,
}

/// POST /api/v1/dogs/{id}/reviews
///
/// Leave a star rating and comment on a dog.
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(dog_id): Path<DbId>,
    Json(input): Json<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Review>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    if DogRepo::find_by_id(&state.pool, dog_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Dog",
            id: dog_id,
        }));
    }

    let images = input.images.unwrap_or_default();
    let review = ReviewRepo::create(
        &state.pool,
        auth.user_id,
        dog_id,
        input.star,
        &input.review,
        &images,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(review))))
}

/// GET /api/v1/dogs/{id}/reviews
///
/// Reviews for a dog with reviewer names, newest first. Public.
pub async fn list_for_dog(
    State(state): State<AppState>,
    Path(dog_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<ReviewListing>>>> {
    let reviews = ReviewRepo::list_for_dog(&state.pool, dog_id).await?;
    Ok(Json(DataResponse::new(reviews)))
}

/// GET /api/v1/reviews/photos
///
/// Recent photo URLs across all reviews. Public.
pub async fn photos(
    State(state): State<AppState>,
    Query(params): Query<PhotoQuery>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let limit = params.limit.unwrap_or(DEFAULT_PHOTO_LIMIT).clamp(1, 200);
    let photos = ReviewRepo::recent_photos(&state.pool, limit).await?;
    Ok(Json(DataResponse::new(photos)))
}

/// DELETE /api/v1/reviews/{id}
///
/// Remove a review. Plain users may only delete their own.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Review",
            id,
        }))?;

    if auth.role == ROLE_USER && review.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only delete your own reviews".into(),
        )));
    }

    ReviewRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
