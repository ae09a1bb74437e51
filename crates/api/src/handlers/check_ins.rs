//! Handlers for the `/check-ins` resource: the in-person walk lifecycle.
//!
//! A marshal checks a walker in (`booked -> walking`), records each dog
//! handed over, and finally completes the booking or marks a no-show.
//! Every transition goes through the table in
//! [`waggytail_core::booking::BookingStatus`]; a call that asks for a
//! transition the table does not contain fails with a conflict.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use waggytail_core::booking::BookingStatus;
use waggytail_core::error::CoreError;
use waggytail_core::types::{DbId, Timestamp};
use waggytail_db::models::booked_walk::{BookedWalk, BookingWithWalker};
use waggytail_db::repositories::{BookedWalkRepo, DogRepo, ScheduledWalkRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireMarshal;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body identifying a booking by its (user, walk) pair.
#[derive(Debug, Deserialize)]
pub struct WalkerRef {
    pub user_id: DbId,
    pub walk_id: DbId,
}

/// Request body for `PUT /check-ins/dog-walked`.
#[derive(Debug, Deserialize)]
pub struct DogWalkedRequest {
    pub user_id: DbId,
    pub walk_id: DbId,
    pub dog_id: DbId,
}

/// Request body for `POST /check-ins/manual`.
#[derive(Debug, Deserialize)]
pub struct ManualWalkRequest {
    pub dog_id: DbId,
    pub date: Timestamp,
}

/// Response for `PUT /check-ins/dog-walked`.
#[derive(Debug, Serialize)]
pub struct DogWalkedResponse {
    pub booking: BookedWalk,
    /// Dogs recorded on this booking so far.
    pub dogs_walked: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/check-ins
///
/// Record a walker's in-person arrival: `booked -> walking`. A walker
/// with no booking on this walk is a 404, not an implicit booking.
pub async fn check_in(
    RequireMarshal(_marshal): RequireMarshal,
    State(state): State<AppState>,
    Json(input): Json<WalkerRef>,
) -> AppResult<Json<DataResponse<BookedWalk>>> {
    let booking = find_booking(&state, input.user_id, input.walk_id).await?;

    let current = parse_status(&booking)?;
    if current == BookingStatus::Walking {
        return Err(AppError::Core(CoreError::Conflict(
            "This walker is already checked in".into(),
        )));
    }
    current
        .ensure_transition(BookingStatus::Walking)
        .map_err(|msg| AppError::Core(CoreError::Conflict(msg)))?;

    let updated = BookedWalkRepo::set_status(&state.pool, booking.id, BookingStatus::Walking)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BookedWalk",
            id: booking.id,
        }))?;

    Ok(Json(DataResponse::new(updated)))
}

/// PUT /api/v1/check-ins/dog-walked
///
/// Record a dog handed to a checked-in walker. Appends the dog to the
/// booking, stamps the dog's `last_walk`, and returns the running count.
pub async fn dog_walked(
    RequireMarshal(_marshal): RequireMarshal,
    State(state): State<AppState>,
    Json(input): Json<DogWalkedRequest>,
) -> AppResult<Json<DataResponse<DogWalkedResponse>>> {
    let booking = find_booking(&state, input.user_id, input.walk_id).await?;

    if DogRepo::find_by_id(&state.pool, input.dog_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Dog",
            id: input.dog_id,
        }));
    }

    if booking.dog_ids.contains(&input.dog_id) {
        return Err(AppError::Core(CoreError::Conflict(
            "This dog is already recorded on this booking".into(),
        )));
    }

    let updated = BookedWalkRepo::record_dog_walked(&state.pool, booking.id, input.dog_id)
        .await?
        // The transaction re-checks membership; a racing duplicate reads
        // the same as the pre-check.
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "This dog is already recorded on this booking".into(),
            ))
        })?;

    let dogs_walked = updated.dog_ids.len();
    Ok(Json(DataResponse::new(DogWalkedResponse {
        booking: updated,
        dogs_walked,
    })))
}

/// PUT /api/v1/check-ins/complete
///
/// Finish a walker's session: `walking -> completed`, award points, and
/// release the walker from the session's active list.
pub async fn complete(
    RequireMarshal(_marshal): RequireMarshal,
    State(state): State<AppState>,
    Json(input): Json<WalkerRef>,
) -> AppResult<Json<DataResponse<BookedWalk>>> {
    let booking = find_booking(&state, input.user_id, input.walk_id).await?;

    if ScheduledWalkRepo::find_by_id(&state.pool, input.walk_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ScheduledWalk",
            id: input.walk_id,
        }));
    }

    parse_status(&booking)?
        .ensure_transition(BookingStatus::Completed)
        .map_err(|msg| AppError::Core(CoreError::Conflict(msg)))?;

    let updated =
        BookedWalkRepo::complete(&state.pool, booking.id, input.user_id, input.walk_id).await?;

    Ok(Json(DataResponse::new(updated)))
}

/// PUT /api/v1/check-ins/no-show
///
/// Mark a walker who never arrived: `booked -> did not show`, deduct
/// points (floored at zero), and release the walker.
pub async fn no_show(
    RequireMarshal(_marshal): RequireMarshal,
    State(state): State<AppState>,
    Json(input): Json<WalkerRef>,
) -> AppResult<Json<DataResponse<BookedWalk>>> {
    let booking = find_booking(&state, input.user_id, input.walk_id).await?;

    if ScheduledWalkRepo::find_by_id(&state.pool, input.walk_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ScheduledWalk",
            id: input.walk_id,
        }));
    }

    parse_status(&booking)?
        .ensure_transition(BookingStatus::DidNotShow)
        .map_err(|msg| AppError::Core(CoreError::Conflict(msg)))?;

    let updated =
        BookedWalkRepo::mark_no_show(&state.pool, booking.id, input.user_id, input.walk_id).await?;

    Ok(Json(DataResponse::new(updated)))
}

/// POST /api/v1/check-ins/manual
///
/// Record a walk-in: a completed walk entry with no scheduled session or
/// booking behind it. The calling marshal is recorded as the supervisor.
pub async fn manual_walk(
    RequireMarshal(marshal): RequireMarshal,
    State(state): State<AppState>,
    Json(input): Json<ManualWalkRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BookedWalk>>)> {
    if DogRepo::find_by_id(&state.pool, input.dog_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Dog",
            id: input.dog_id,
        }));
    }

    let booking =
        BookedWalkRepo::create_manual(&state.pool, input.dog_id, marshal.user_id, input.date)
            .await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(booking))))
}

/// GET /api/v1/check-ins/finished
///
/// Bookings in a terminal state, most recent first.
pub async fn finished(
    RequireMarshal(_marshal): RequireMarshal,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingWithWalker>>>> {
    let bookings = BookedWalkRepo::list_finished(&state.pool).await?;
    Ok(Json(DataResponse::new(bookings)))
}

/// GET /api/v1/check-ins/schedule
///
/// Every booking with walker identity expanded, soonest first.
pub async fn schedule(
    RequireMarshal(_marshal): RequireMarshal,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingWithWalker>>>> {
    let bookings = BookedWalkRepo::list_with_walkers(&state.pool).await?;
    Ok(Json(DataResponse::new(bookings)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find the booking for a (user, walk) pair or fail with 404.
async fn find_booking(state: &AppState, user_id: DbId, walk_id: DbId) -> AppResult<BookedWalk> {
    BookedWalkRepo::find_by_user_and_walk(&state.pool, user_id, walk_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BookedWalk",
            id: walk_id,
        }))
}

/// Parse a booking's stored status text, failing loudly on unknown values.
fn parse_status(booking: &BookedWalk) -> AppResult<BookingStatus> {
    BookingStatus::parse(&booking.status).ok_or_else(|| {
        AppError::Core(CoreError::Internal(format!(
            "Booking {} has unknown status '{}'",
            booking.id, booking.status
        )))
    })
}
