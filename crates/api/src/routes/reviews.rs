//! Route definitions for the `/reviews` resource.
//!
//! Creation and per-dog listing live under `/dogs/{id}/reviews`.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /photos  -> photos (public)
/// DELETE /{id}    -> delete (owner or staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/photos", get(reviews::photos))
        .route("/{id}", delete(reviews::delete))
}
