//! Route definitions for the `/marshal-applications` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::marshal_applications;
use crate::state::AppState;

/// Routes mounted at `/marshal-applications`.
///
/// ```text
/// POST /       -> apply (auth)
/// GET  /       -> list (admin)
/// PUT  /{id}   -> decide (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(marshal_applications::list).post(marshal_applications::apply),
        )
        .route("/{id}", put(marshal_applications::decide))
}
