//! HTTP-level integration tests for adoption inquiries and marshal
//! applications.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_user, delete_auth, get_auth, login_token, post_json_auth,
    put_json_auth,
};
use sqlx::PgPool;
use waggytail_core::types::DbId;
use waggytail_db::models::dog::CreateDog;
use waggytail_db::repositories::{DogRepo, UserRepo};

async fn create_dog(pool: &PgPool, name: &str) -> DbId {
    DogRepo::create(
        pool,
        &CreateDog {
            name: name.to_string(),
            breed: "Beagle".to_string(),
            color: None,
            age: Some(3),
            size: "Small".to_string(),
            demeanor: None,
            status: None,
            photos: None,
            notes: None,
        },
    )
    .await
    .expect("dog creation should succeed")
    .id
}

// ---------------------------------------------------------------------------
// Adoption inquiries
// ---------------------------------------------------------------------------

/// An inquiry starts Pending; a second one for the same dog is a 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_inquiry_create_and_duplicate(pool: PgPool) {
    let (_user, pw) = create_test_user(&pool, "hopeful@example.com", "user").await;
    let token = login_token(common::build_test_app(pool.clone()), "hopeful@example.com", &pw).await;
    let dog_id = create_dog(&pool, "Biscuit").await;

    let body = serde_json::json!({ "dog_id": dog_id, "message": "We'd love to meet Biscuit" });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/adoptions", &token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "Pending");

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/adoptions", &token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// A reply sets status Replied, stores the text, and notifies the
/// inquirer.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_reply_notifies_inquirer(pool: PgPool) {
    let (_user, user_pw) = create_test_user(&pool, "hopeful@example.com", "user").await;
    let (_admin, admin_pw) = create_test_user(&pool, "admin@example.com", "admin").await;
    let user_token =
        login_token(common::build_test_app(pool.clone()), "hopeful@example.com", &user_pw).await;
    let admin_token =
        login_token(common::build_test_app(pool.clone()), "admin@example.com", &admin_pw).await;
    let dog_id = create_dog(&pool, "Biscuit").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "dog_id": dog_id, "message": "Interested!" });
    let response = post_json_auth(app, "/api/v1/adoptions", &user_token, body).await;
    let inquiry_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "message": "Come meet Biscuit on Saturday" });
    let response =
        post_json_auth(app, &format!("/api/v1/adoptions/{inquiry_id}/reply"), &admin_token, body)
            .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "Replied");
    assert_eq!(json["data"]["reply_message"], "Come meet Biscuit on Saturday");

    // The inquirer sees an adoption notification.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &user_token).await;
    let json = body_json(response).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["kind"] == "adoption"));
}

/// Admin status updates accept Approved/Rejected and nothing else.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_update_validation(pool: PgPool) {
    let (_user, user_pw) = create_test_user(&pool, "hopeful@example.com", "user").await;
    let (_admin, admin_pw) = create_test_user(&pool, "admin@example.com", "admin").await;
    let user_token =
        login_token(common::build_test_app(pool.clone()), "hopeful@example.com", &user_pw).await;
    let admin_token =
        login_token(common::build_test_app(pool.clone()), "admin@example.com", &admin_pw).await;
    let dog_id = create_dog(&pool, "Biscuit").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "dog_id": dog_id, "message": "Interested!" });
    let response = post_json_auth(app, "/api/v1/adoptions", &user_token, body).await;
    let inquiry_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "Replied" });
    let response =
        put_json_auth(app, &format!("/api/v1/adoptions/{inquiry_id}"), &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "Approved" });
    let response =
        put_json_auth(app, &format!("/api/v1/adoptions/{inquiry_id}"), &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "Approved");
}

/// Users may only withdraw their own inquiries.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_inquiry_delete_ownership(pool: PgPool) {
    let (_owner, owner_pw) = create_test_user(&pool, "owner@example.com", "user").await;
    let (_other, other_pw) = create_test_user(&pool, "other@example.com", "user").await;
    let owner_token =
        login_token(common::build_test_app(pool.clone()), "owner@example.com", &owner_pw).await;
    let other_token =
        login_token(common::build_test_app(pool.clone()), "other@example.com", &other_pw).await;
    let dog_id = create_dog(&pool, "Biscuit").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "dog_id": dog_id, "message": "Interested!" });
    let response = post_json_auth(app, "/api/v1/adoptions", &owner_token, body).await;
    let inquiry_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response =
        delete_auth(app, &format!("/api/v1/adoptions/{inquiry_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response =
        delete_auth(app, &format!("/api/v1/adoptions/{inquiry_id}"), &owner_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

/// The lookup probe returns the inquiry or null.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_inquiry_lookup(pool: PgPool) {
    let (user, pw) = create_test_user(&pool, "hopeful@example.com", "user").await;
    let token = login_token(common::build_test_app(pool.clone()), "hopeful@example.com", &pw).await;
    let dog_id = create_dog(&pool, "Biscuit").await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/adoptions/lookup/{}/{}", user.id, dog_id),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["data"].is_null());

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "dog_id": dog_id, "message": "Interested!" });
    post_json_auth(app, "/api/v1/adoptions", &token, body).await;

    let app = common::build_test_app(pool.clone());
    let response = get_auth(
        app,
        &format!("/api/v1/adoptions/lookup/{}/{}", user.id, dog_id),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["dog_id"], dog_id);
}

// ---------------------------------------------------------------------------
// Marshal applications
// ---------------------------------------------------------------------------

/// Two simultaneous pending applications are rejected; approval promotes
/// the applicant to marshal and notifies them.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_marshal_application_flow(pool: PgPool) {
    let (applicant, user_pw) = create_test_user(&pool, "keen@example.com", "user").await;
    let (_admin, admin_pw) = create_test_user(&pool, "admin@example.com", "admin").await;
    let user_token =
        login_token(common::build_test_app(pool.clone()), "keen@example.com", &user_pw).await;
    let admin_token =
        login_token(common::build_test_app(pool.clone()), "admin@example.com", &admin_pw).await;

    let body = serde_json::json!({ "message": "I walk dogs every weekend" });
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/marshal-applications", &user_token, body.clone())
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let application_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // A second pending application conflicts.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/marshal-applications", &user_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Approval promotes the applicant.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "Approved" });
    let response = put_json_auth(
        app,
        &format!("/api/v1/marshal-applications/{application_id}"),
        &admin_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let promoted = UserRepo::find_by_id(&pool, applicant.id).await.unwrap().unwrap();
    assert_eq!(promoted.role, "marshal");

    // The applicant is notified of the outcome.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/v1/notifications", &user_token).await;
    let json = body_json(response).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["kind"] == "marshal_application"));

    // A decided application cannot be decided again.
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "status": "Rejected" });
    let response = put_json_auth(
        app,
        &format!("/api/v1/marshal-applications/{application_id}"),
        &admin_token,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
