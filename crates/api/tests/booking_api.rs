//! HTTP-level integration tests for the slot booking core: confirm,
//! cancel, and the check-in lifecycle.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, login_token, post_json_auth, put_json_auth,
};
use sqlx::PgPool;
use waggytail_core::types::DbId;
use waggytail_db::models::dog::CreateDog;
use waggytail_db::repositories::{BookedWalkRepo, DogRepo, ScheduledWalkRepo, UserRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a walk via the API as the given marshal, returning its id.
async fn create_walk(pool: &PgPool, marshal_token: &str, capacity: i32) -> DbId {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({
        "date": "2030-06-15T10:00:00Z",
        "location": "Riverside Park",
        "capacity_unit": capacity,
    });
    let response = post_json_auth(app, "/api/v1/walks", marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Confirm a booking via the API, returning the raw response.
async fn confirm(
    pool: &PgPool,
    token: &str,
    walk_id: DbId,
    slots: i32,
) -> axum::http::Response<axum::body::Body> {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/walks/{walk_id}/confirm"),
        token,
        serde_json::json!({ "slots": slots }),
    )
    .await
}

/// Seed a dog directly in the database.
async fn create_dog(pool: &PgPool, name: &str) -> DbId {
    let dog = DogRepo::create(
        pool,
        &CreateDog {
            name: name.to_string(),
            breed: "Lurcher".to_string(),
            color: None,
            age: Some(4),
            size: "Medium".to_string(),
            demeanor: None,
            status: None,
            photos: None,
            notes: None,
        },
    )
    .await
    .expect("dog creation should succeed");
    dog.id
}

/// Standard fixture: one marshal (with token) and one walker (with token).
async fn fixture(pool: &PgPool) -> (String, String, DbId) {
    let (_marshal, marshal_pw) = create_test_user(pool, "marshal@example.com", "marshal").await;
    let (walker, walker_pw) = create_test_user(pool, "walker@example.com", "user").await;

    let marshal_token = login_token(
        common::build_test_app(pool.clone()),
        "marshal@example.com",
        &marshal_pw,
    )
    .await;
    let walker_token = login_token(
        common::build_test_app(pool.clone()),
        "walker@example.com",
        &walker_pw,
    )
    .await;

    (marshal_token, walker_token, walker.id)
}

// ---------------------------------------------------------------------------
// Confirm / cancel
// ---------------------------------------------------------------------------

/// Confirming 2 slots on a 4-slot walk leaves 2 and records full
/// cross-reference symmetry; cancelling restores everything.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_confirm_and_cancel_symmetry(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;

    let response = confirm(&pool, &walker_token, walk_id, 2).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Booking symmetry: all four memberships present, slots decremented.
    let walk = ScheduledWalkRepo::find_by_id(&pool, walk_id).await.unwrap().unwrap();
    assert_eq!(walk.slots, 2);
    assert!(walk.walker_ids.contains(&walker_id));
    assert!(walk.booking_ids.contains(&booking_id));

    let walker = UserRepo::find_by_id(&pool, walker_id).await.unwrap().unwrap();
    assert!(walker.dogs_walked.contains(&walk_id));
    assert!(walker.booked_walks.contains(&booking_id));

    let booking = BookedWalkRepo::find_by_id(&pool, booking_id).await.unwrap().unwrap();
    assert_eq!(booking.status, "booked");
    assert_eq!(booking.slots, 2);
    assert_eq!(booking.location.as_deref(), Some("Riverside Park"));

    // Cancel: capacity restored, every membership gone, row deleted.
    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/bookings/{booking_id}"), &walker_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let walk = ScheduledWalkRepo::find_by_id(&pool, walk_id).await.unwrap().unwrap();
    assert_eq!(walk.slots, 4);
    assert!(!walk.walker_ids.contains(&walker_id));
    assert!(!walk.booking_ids.contains(&booking_id));

    let walker = UserRepo::find_by_id(&pool, walker_id).await.unwrap().unwrap();
    assert!(walker.dogs_walked.is_empty());
    assert!(walker.booked_walks.is_empty());

    assert!(BookedWalkRepo::find_by_id(&pool, booking_id).await.unwrap().is_none());
}

/// A full walk rejects further bookings with a descriptive conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_insufficient_slots(pool: PgPool) {
    let (marshal_token, walker_token, _walker_id) = fixture(&pool).await;
    let (_u2, u2_pw) = create_test_user(&pool, "second@example.com", "user").await;
    let u2_token = login_token(
        common::build_test_app(pool.clone()),
        "second@example.com",
        &u2_pw,
    )
    .await;

    let walk_id = create_walk(&pool, &marshal_token, 1).await;

    let response = confirm(&pool, &walker_token, walk_id, 1).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let walk = ScheduledWalkRepo::find_by_id(&pool, walk_id).await.unwrap().unwrap();
    assert_eq!(walk.slots, 0);

    let response = confirm(&pool, &u2_token, walk_id, 1).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Capacity never goes negative.
    let walk = ScheduledWalkRepo::find_by_id(&pool, walk_id).await.unwrap().unwrap();
    assert_eq!(walk.slots, 0);
}

/// Requesting more slots than remain is rejected up front.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_confirm_over_capacity_rejected(pool: PgPool) {
    let (marshal_token, walker_token, _walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;

    let response = confirm(&pool, &walker_token, walk_id, 5).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A second confirm by the same user without cancelling is rejected.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_booking_rejected(pool: PgPool) {
    let (marshal_token, walker_token, _walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;

    let response = confirm(&pool, &walker_token, walk_id, 1).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = confirm(&pool, &walker_token, walk_id, 1).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Only the first reservation took effect.
    let walk = ScheduledWalkRepo::find_by_id(&pool, walk_id).await.unwrap().unwrap();
    assert_eq!(walk.slots, 3);
}

/// Confirming against a missing walk is a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_confirm_missing_walk(pool: PgPool) {
    let (_marshal_token, walker_token, _walker_id) = fixture(&pool).await;
    let response = confirm(&pool, &walker_token, 9999, 1).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// A plain user cannot cancel someone else's booking; staff can.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_cancel_ownership(pool: PgPool) {
    let (marshal_token, walker_token, _walker_id) = fixture(&pool).await;
    let (_other, other_pw) = create_test_user(&pool, "other@example.com", "user").await;
    let other_token = login_token(
        common::build_test_app(pool.clone()),
        "other@example.com",
        &other_pw,
    )
    .await;

    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    let response = confirm(&pool, &walker_token, walk_id, 1).await;
    let booking_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/v1/bookings/{booking_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The marshal may cancel on the walker's behalf.
    let app = common::build_test_app(pool.clone());
    let response =
        delete_auth(app, &format!("/api/v1/bookings/{booking_id}"), &marshal_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Check-in lifecycle
// ---------------------------------------------------------------------------

/// The happy path end to end: confirm, check in, record a dog, complete.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_full_walk_lifecycle(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    let dog_id = create_dog(&pool, "Biscuit").await;

    let response = confirm(&pool, &walker_token, walk_id, 2).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let booking_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Check in: booked -> walking.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let response = post_json_auth(app, "/api/v1/check-ins", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "walking");

    // Record a dog handed over.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id, "dog_id": dog_id });
    let response = put_json_auth(app, "/api/v1/check-ins/dog-walked", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["dogs_walked"], 1);

    let dog = DogRepo::find_by_id(&pool, dog_id).await.unwrap().unwrap();
    assert!(dog.last_walk.is_some(), "dog's last_walk is stamped");
    assert!(dog.walks.contains(&booking_id));

    // Complete: walking -> completed, +10 points, walker released.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let response = put_json_auth(app, "/api/v1/check-ins/complete", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "completed");

    let walker = UserRepo::find_by_id(&pool, walker_id).await.unwrap().unwrap();
    assert_eq!(walker.user_points, 10);
    assert!(!walker.dogs_walked.contains(&walk_id));

    let walk = ScheduledWalkRepo::find_by_id(&pool, walk_id).await.unwrap().unwrap();
    assert!(!walk.walker_ids.contains(&walker_id));
}

/// Checking in twice is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_double_check_in_rejected(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    confirm(&pool, &walker_token, walk_id, 1).await;

    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/check-ins", &marshal_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/check-ins", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Checking in a walker with no booking is a 404, not an implicit booking.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_check_in_without_booking(pool: PgPool) {
    let (marshal_token, _walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let response = post_json_auth(app, "/api/v1/check-ins", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Completing a booking that was never checked in is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_complete_requires_check_in(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    confirm(&pool, &walker_token, walk_id, 1).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let response = put_json_auth(app, "/api/v1/check-ins/complete", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Recording the same dog twice on one booking is a conflict.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_dog_rejected(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    let dog_id = create_dog(&pool, "Biscuit").await;
    confirm(&pool, &walker_token, walk_id, 1).await;

    let app = common::build_test_app(pool.clone());
    let check_in = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    post_json_auth(app, "/api/v1/check-ins", &marshal_token, check_in).await;

    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id, "dog_id": dog_id });
    let app = common::build_test_app(pool.clone());
    let response =
        put_json_auth(app, "/api/v1/check-ins/dog-walked", &marshal_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, "/api/v1/check-ins/dog-walked", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A no-show deducts points but never below zero, and a checked-in
/// walker can no longer be marked a no-show.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_no_show_points_floor(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    confirm(&pool, &walker_token, walk_id, 1).await;

    // Walker starts at 0 points; the -5 penalty floors at 0.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let response = put_json_auth(app, "/api/v1/check-ins/no-show", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "did not show");

    let walker = UserRepo::find_by_id(&pool, walker_id).await.unwrap().unwrap();
    assert_eq!(walker.user_points, 0);
    assert!(!walker.dogs_walked.contains(&walk_id));
}

/// `did not show` is terminal: a later check-in attempt conflicts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_no_show_is_terminal(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    confirm(&pool, &walker_token, walk_id, 1).await;

    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let app = common::build_test_app(pool.clone());
    put_json_auth(app, "/api/v1/check-ins/no-show", &marshal_token, body.clone()).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/check-ins", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A manual walk-in creates a completed booking with no session and
/// stamps the dog.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_manual_walk_in(pool: PgPool) {
    let (marshal_token, _walker_token, _walker_id) = fixture(&pool).await;
    let dog_id = create_dog(&pool, "Patch").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "dog_id": dog_id, "date": "2030-06-15T10:00:00Z" });
    let response = post_json_auth(app, "/api/v1/check-ins/manual", &marshal_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "completed");
    assert!(json["data"]["walk_id"].is_null());

    let dog = DogRepo::find_by_id(&pool, dog_id).await.unwrap().unwrap();
    assert!(dog.last_walk.is_some());
}

/// The check-in lifecycle endpoints reject plain users.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_check_in_requires_marshal(pool: PgPool) {
    let (marshal_token, walker_token, walker_id) = fixture(&pool).await;
    let walk_id = create_walk(&pool, &marshal_token, 4).await;
    confirm(&pool, &walker_token, walk_id, 1).await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "user_id": walker_id, "walk_id": walk_id });
    let response = post_json_auth(app, "/api/v1/check-ins", &walker_token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
