//! Route definitions for the `/adoptions` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::adoptions;
use crate::state::AppState;

/// Routes mounted at `/adoptions`.
///
/// ```text
/// POST   /                             -> create_inquiry (auth)
/// GET    /                             -> list_all (admin)
/// GET    /pending                      -> list_pending (admin)
/// GET    /mine                         -> list_mine (auth)
/// GET    /lookup/{user_id}/{dog_id}    -> lookup (auth)
/// POST   /{id}/reply                   -> reply (admin)
/// PUT    /{id}                         -> update_status (admin)
/// DELETE /{id}                         -> delete (owner or staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(adoptions::list_all).post(adoptions::create_inquiry),
        )
        .route("/pending", get(adoptions::list_pending))
        .route("/mine", get(adoptions::list_mine))
        .route("/lookup/{user_id}/{dog_id}", get(adoptions::lookup))
        .route("/{id}/reply", post(adoptions::reply))
        .route(
            "/{id}",
            put(adoptions::update_status).delete(adoptions::delete),
        )
}
