//! Route definitions for the `/walks` and `/bookings` resources.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::walks;
use crate::state::AppState;

/// Routes mounted at `/walks`.
///
/// ```text
/// GET    /               -> list_walks (auth)
/// POST   /               -> create_walk (marshal)
/// GET    /mine           -> my_walks (marshal)
/// GET    /check-in       -> check_in_schedule (public kiosk)
/// DELETE /day/{date}     -> cancel_day (admin)
/// DELETE /{id}           -> delete_walk (admin)
/// POST   /{id}/confirm   -> confirm (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(walks::list_walks).post(walks::create_walk))
        .route("/mine", get(walks::my_walks))
        .route("/check-in", get(walks::check_in_schedule))
        .route("/day/{date}", delete(walks::cancel_day))
        .route("/{id}", delete(walks::delete_walk))
        .route("/{id}/confirm", post(walks::confirm))
}

/// Routes mounted at `/bookings`.
///
/// ```text
/// DELETE /{id}  -> cancel_booking (owner or staff)
/// ```
pub fn bookings_router() -> Router<AppState> {
    Router::new().route("/{id}", delete(walks::cancel_booking))
}
