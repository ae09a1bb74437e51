pub mod adoptions;
pub mod auth;
pub mod check_ins;
pub mod dogs;
pub mod health;
pub mod marshal_applications;
pub mod notifications;
pub mod reviews;
pub mod settings;
pub mod users;
pub mod walks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                           register (public)
/// /auth/login                            login (public)
/// /auth/refresh                          refresh (public)
/// /auth/logout                           logout (requires auth)
///
/// /users/me                              get, update own profile
/// /users?role=                           list users (marshal/admin)
/// /users/{id}                            delete user (admin)
///
/// /dogs                                  list (auth), create (admin)
/// /dogs/{id}                             get (auth), update, delete (admin)
/// /dogs/{id}/reviews                     list (public), create (auth)
///
/// /walks                                 list (auth), create (marshal)
/// /walks/mine                            walks hosted by caller (marshal)
/// /walks/check-in                        today's sessions (public kiosk)
/// /walks/day/{date}                      cancel whole day (admin)
/// /walks/{id}                            delete walk + bookings (admin)
/// /walks/{id}/confirm                    reserve slots (auth)
///
/// /bookings/{id}                         cancel booking (owner or staff)
///
/// /check-ins                             check in a walker (marshal)
/// /check-ins/dog-walked                  record a dog handed over (marshal)
/// /check-ins/complete                    complete a walker (marshal)
/// /check-ins/no-show                     mark a no-show (marshal)
/// /check-ins/manual                      record a walk-in (marshal)
/// /check-ins/finished                    terminal bookings (marshal)
/// /check-ins/schedule                    all bookings (marshal)
///
/// /adoptions                             create (auth), list all (admin)
/// /adoptions/pending                     pending inquiries (admin)
/// /adoptions/mine                        caller's inquiries (auth)
/// /adoptions/lookup/{user_id}/{dog_id}   existence probe (auth)
/// /adoptions/{id}                        update status (admin), delete (owner)
/// /adoptions/{id}/reply                  staff reply (admin)
///
/// /marshal-applications                  apply (auth), list (admin)
/// /marshal-applications/{id}             decide (admin)
///
/// /reviews/photos                        recent photo wall (public)
/// /reviews/{id}                          delete review (owner or staff)
///
/// /notifications                         caller's feed (auth)
/// /notifications/unread-count            unread count (auth)
/// /notifications/announce                broadcast (admin)
/// /notifications/{id}/read               mark read (auth, scoped)
///
/// /settings/restrictions                 get (auth), update (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/dogs", dogs::router())
        .nest("/walks", walks::router())
        .nest("/bookings", walks::bookings_router())
        .nest("/check-ins", check_ins::router())
        .nest("/adoptions", adoptions::router())
        .nest("/marshal-applications", marshal_applications::router())
        .nest("/reviews", reviews::router())
        .nest("/notifications", notifications::router())
        .nest("/settings", settings::router())
}
