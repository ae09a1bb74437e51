//! Handlers for the `/walks` resource: session scheduling, slot booking,
//! and cancellation. This is the stateful core of the platform.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use waggytail_core::error::CoreError;
use waggytail_core::notifications::{KIND_ANNOUNCEMENT, KIND_BOOKING};
use waggytail_core::roles::{ROLE_MARSHAL, ROLE_USER};
use waggytail_core::schedule::{day_bounds, DEFAULT_CAPACITY_UNIT};
use waggytail_core::types::{DbId, Timestamp};
use waggytail_db::models::booked_walk::BookedWalk;
use waggytail_db::models::notification::CreateNotification;
use waggytail_db::models::scheduled_walk::{CreateScheduledWalk, ScheduledWalk, WalkListing};
use waggytail_db::repositories::{BookedWalkRepo, NotificationRepo, ScheduledWalkRepo, UserRepo};
use waggytail_events::OutboundEmail;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireAdmin, RequireMarshal};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /walks`.
#[derive(Debug, Deserialize)]
pub struct CreateWalkRequest {
    /// The hosting marshal. Defaults to the caller, so admins can
    /// schedule on a marshal's behalf.
    pub marshal_id: Option<DbId>,
    pub date: Timestamp,
    pub location: String,
    pub dog_id: Option<DbId>,
    /// Capacity contributed by this marshal. Defaults to 4.
    pub capacity_unit: Option<i32>,
}

/// Request body for `POST /walks/{id}/confirm`.
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    /// Seats to reserve. Defaults to 1.
    pub slots: Option<i32>,
}

/// Response for `DELETE /walks/day/{date}`.
#[derive(Debug, Serialize)]
pub struct CancelDayResponse {
    pub walks_deleted: u64,
    pub bookings_deleted: u64,
}

// ---------------------------------------------------------------------------
// Scheduling
// ---------------------------------------------------------------------------

/// POST /api/v1/walks
///
/// Schedule a walk session. If a session already exists at the same
/// date + location under a different marshal, this marshal joins it and
/// adds their capacity instead of creating a duplicate ("shared
/// session" merge). Broadcasts an announcement to all users.
pub async fn create_walk(
    RequireMarshal(caller): RequireMarshal,
    State(state): State<AppState>,
    Json(input): Json<CreateWalkRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<ScheduledWalk>>)> {
    if input.location.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "location is required".into(),
        )));
    }

    let marshal_id = input.marshal_id.unwrap_or(caller.user_id);
    let capacity_unit = input.capacity_unit.unwrap_or(DEFAULT_CAPACITY_UNIT);
    if capacity_unit <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "capacity_unit must be positive".into(),
        )));
    }

    // The hosting user must actually hold the marshal role.
    let marshal = UserRepo::find_by_id(&state.pool, marshal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: marshal_id,
        }))?;
    if marshal.role != ROLE_MARSHAL {
        return Err(AppError::Core(CoreError::Validation(
            "The referenced user is not a marshal".into(),
        )));
    }

    // A marshal cannot host two sessions at the exact same time.
    if ScheduledWalkRepo::find_by_marshal_and_date(&state.pool, marshal_id, input.date)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "This marshal already has a walk scheduled at this time".into(),
        )));
    }

    // Same time + place by another marshal: join the session.
    let (walk, created) = match ScheduledWalkRepo::find_by_date_and_location(
        &state.pool,
        input.date,
        &input.location,
    )
    .await?
    {
        Some(existing) => {
            let merged =
                ScheduledWalkRepo::merge_marshal(&state.pool, existing.id, marshal_id, capacity_unit)
                    .await?
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Conflict(
                            "This marshal is already attached to this walk".into(),
                        ))
                    })?;
            tracing::info!(walk_id = merged.id, marshal_id, "Merged marshal into shared session");
            (merged, false)
        }
        None => {
            let created = ScheduledWalkRepo::create(
                &state.pool,
                &CreateScheduledWalk {
                    dog_id: input.dog_id,
                    marshal_id,
                    date: input.date,
                    location: input.location.clone(),
                    slots: capacity_unit,
                },
            )
            .await?;
            (created, true)
        }
    };

    announce_walk(&state, &walk).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(DataResponse::new(walk))))
}

/// GET /api/v1/walks
///
/// All walk sessions with marshal and dog names expanded.
pub async fn list_walks(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WalkListing>>>> {
    let walks = ScheduledWalkRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(walks)))
}

/// GET /api/v1/walks/mine
///
/// Walks hosted by the calling marshal.
pub async fn my_walks(
    RequireMarshal(caller): RequireMarshal,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<WalkListing>>>> {
    let walks = ScheduledWalkRepo::list_for_marshal(&state.pool, caller.user_id).await?;
    Ok(Json(DataResponse::new(walks)))
}

/// GET /api/v1/walks/check-in
///
/// Today's sessions for the check-in desk. Intentionally unauthenticated:
/// the kiosk in the field has no session.
pub async fn check_in_schedule(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ScheduledWalk>>>> {
    let today = chrono::Utc::now().date_naive();
    let (start, end) = day_bounds(today);
    let walks = ScheduledWalkRepo::list_in_range(&state.pool, start, end).await?;
    Ok(Json(DataResponse::new(walks)))
}

/// DELETE /api/v1/walks/{id}
///
/// Remove a session and every booking on it, cleaning each affected
/// user's lists. Admin only. Returns 204 No Content.
pub async fn delete_walk(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ScheduledWalkRepo::delete_cascade(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ScheduledWalk",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/walks/day/{date}
///
/// Remove every session on a calendar day (YYYY-MM-DD) with the same
/// cascade semantics. Admin only.
pub async fn cancel_day(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<DataResponse<CancelDayResponse>>> {
    let date: NaiveDate = date
        .parse()
        .map_err(|_| AppError::Core(CoreError::Validation("Invalid date, expected YYYY-MM-DD".into())))?;

    let (start, end) = day_bounds(date);
    let (walks_deleted, bookings_deleted) =
        ScheduledWalkRepo::delete_day_cascade(&state.pool, start, end).await?;

    Ok(Json(DataResponse::new(CancelDayResponse {
        walks_deleted,
        bookings_deleted,
    })))
}

// ---------------------------------------------------------------------------
// Slot booking
// ---------------------------------------------------------------------------

/// POST /api/v1/walks/{id}/confirm
///
/// Reserve slots on a session for the caller. The capacity check and
/// decrement happen as one conditional update, so concurrent confirms
/// cannot over-book.
pub async fn confirm(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(walk_id): Path<DbId>,
    Json(input): Json<ConfirmRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<BookedWalk>>)> {
    let slots_requested = input.slots.unwrap_or(1);
    if slots_requested < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "slots must be at least 1".into(),
        )));
    }

    let walk = ScheduledWalkRepo::find_by_id(&state.pool, walk_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ScheduledWalk",
            id: walk_id,
        }))?;

    if walk.walker_ids.contains(&auth.user_id) {
        return Err(AppError::Core(CoreError::Conflict(
            "You have already booked this walk".into(),
        )));
    }
    if walk.slots < slots_requested {
        return Err(AppError::Core(CoreError::Conflict(
            "Not enough slots available".into(),
        )));
    }

    let booking = BookedWalkRepo::confirm(&state.pool, &walk, auth.user_id, slots_requested)
        .await?
        // The guard re-checks inside the transaction; losing the race
        // reads the same as losing the pre-check.
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict("Not enough slots available".into()))
        })?;

    // Side effects after commit: confirmation mail + marshal notifications.
    let user = UserRepo::find_by_id(&state.pool, auth.user_id).await?;
    if let Some(user) = &user {
        state
            .mailer
            .send(OutboundEmail::booking_confirmation(
                &user.email,
                &user.name,
                &walk.location,
                &walk.date.format("%Y-%m-%d %H:%M").to_string(),
                slots_requested,
            ))
            .await;
    }

    let walker_name = user.map(|u| u.name).unwrap_or_else(|| "A walker".to_string());
    for marshal_id in &walk.marshal_ids {
        NotificationRepo::create(
            &state.pool,
            &CreateNotification::targeted(
                *marshal_id,
                KIND_BOOKING,
                format!(
                    "{walker_name} booked {slots_requested} slot(s) on the {} walk at {}",
                    walk.date.format("%Y-%m-%d %H:%M"),
                    walk.location
                ),
            )
            .with_walk(walk.id),
        )
        .await?;
    }

    Ok((StatusCode::CREATED, Json(DataResponse::new(booking))))
}

/// DELETE /api/v1/bookings/{id}
///
/// Cancel a booking, restoring the session's capacity and cleaning the
/// cross-references. Plain users may only cancel their own bookings.
pub async fn cancel_booking(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(booking_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let booking = BookedWalkRepo::find_by_id(&state.pool, booking_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BookedWalk",
            id: booking_id,
        }))?;

    if auth.role == ROLE_USER && booking.user_id != Some(auth.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You may only cancel your own bookings".into(),
        )));
    }

    BookedWalkRepo::cancel(&state.pool, &booking).await?;

    if let Some(walk_id) = booking.walk_id {
        for marshal_id in &booking.marshal_ids {
            NotificationRepo::create(
                &state.pool,
                &CreateNotification::targeted(
                    *marshal_id,
                    KIND_BOOKING,
                    format!(
                        "A booking was cancelled; {} slot(s) released on the {} walk",
                        booking.slots,
                        booking.date.format("%Y-%m-%d %H:%M")
                    ),
                )
                .with_walk(walk_id),
            )
            .await?;
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Broadcast a new-walk announcement and send best-effort mail to every
/// user. Individual mail failures are logged inside the mailer and never
/// abort the request.
async fn announce_walk(state: &AppState, walk: &ScheduledWalk) -> AppResult<()> {
    let date = walk.date.format("%Y-%m-%d %H:%M").to_string();

    NotificationRepo::create(
        &state.pool,
        &CreateNotification::broadcast(
            ROLE_USER,
            KIND_ANNOUNCEMENT,
            format!("A new group walk was scheduled at {} on {date}", walk.location),
        )
        .with_walk(walk.id),
    )
    .await?;

    let users = UserRepo::list_by_role(&state.pool, ROLE_USER).await?;
    for user in &users {
        state
            .mailer
            .send(OutboundEmail::walk_announcement(
                &user.email,
                &user.name,
                &walk.location,
                &date,
            ))
            .await;
    }

    Ok(())
}
