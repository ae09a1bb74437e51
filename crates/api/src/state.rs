use std::sync::Arc;

use waggytail_events::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: waggytail_db::DbPool,
    /// Server configuration (JWT secret, timeouts, reminder schedule).
    pub config: Arc<ServerConfig>,
    /// Best-effort outbound mail facade.
    pub mailer: Arc<Mailer>,
}
