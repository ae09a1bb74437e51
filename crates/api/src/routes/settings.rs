//! Route definitions for the `/settings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET /restrictions  -> get_restrictions (auth)
/// PUT /restrictions  -> update_restrictions (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/restrictions",
        get(settings::get_restrictions).put(settings::update_restrictions),
    )
}
