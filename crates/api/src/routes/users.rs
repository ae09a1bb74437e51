//! Route definitions for the `/users` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /me        -> me
/// PUT    /me        -> update_me
/// GET    /?role=    -> list_users (marshal/admin)
/// DELETE /{id}      -> delete_user (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me).put(users::update_me))
        .route("/", get(users::list_users))
        .route("/{id}", delete(users::delete_user))
}
