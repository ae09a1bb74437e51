//! Route definitions for the `/notifications` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notifications;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET  /              -> list (auth)
/// GET  /unread-count  -> unread_count (auth)
/// POST /announce      -> announce (admin)
/// POST /{id}/read     -> mark_read (auth, scoped)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route("/unread-count", get(notifications::unread_count))
        .route("/announce", post(notifications::announce))
        .route("/{id}/read", post(notifications::mark_read))
}
