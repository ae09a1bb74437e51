//! Route definitions for the `/dogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{dogs, reviews};
use crate::state::AppState;

/// Routes mounted at `/dogs`.
///
/// ```text
/// GET    /               -> list_dogs (auth)
/// POST   /               -> create_dog (admin)
/// GET    /{id}           -> get_dog (auth)
/// PUT    /{id}           -> update_dog (admin)
/// DELETE /{id}           -> delete_dog (admin)
/// GET    /{id}/reviews   -> reviews::list_for_dog (public)
/// POST   /{id}/reviews   -> reviews::create_review (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dogs::list_dogs).post(dogs::create_dog))
        .route(
            "/{id}",
            get(dogs::get_dog).put(dogs::update_dog).delete(dogs::delete_dog),
        )
        .route(
            "/{id}/reviews",
            get(reviews::list_for_dog).post(reviews::create_review),
        )
}
