//! Route definitions for the `/check-ins` resource.
//!
//! All endpoints require the marshal (or admin) role.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::check_ins;
use crate::state::AppState;

/// Routes mounted at `/check-ins`.
///
/// ```text
/// POST /             -> check_in
/// PUT  /dog-walked   -> dog_walked
/// PUT  /complete     -> complete
/// PUT  /no-show      -> no_show
/// POST /manual       -> manual_walk
/// GET  /finished     -> finished
/// GET  /schedule     -> schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(check_ins::check_in))
        .route("/dog-walked", put(check_ins::dog_walked))
        .route("/complete", put(check_ins::complete))
        .route("/no-show", put(check_ins::no_show))
        .route("/manual", post(check_ins::manual_walk))
        .route("/finished", get(check_ins::finished))
        .route("/schedule", get(check_ins::schedule))
}
