mod common;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, create_admin, create_student, create_teacher, get_auth_token, send,
    setup_test_app, test_state,
};
use ecam_models::PersonCreate;
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_bearer_token(pool: SqlitePool) {
    let state = test_state(pool);
    create_student(&state, "alice@school.com", Some("12345")).await;

    let (status, body) = send(
        setup_test_app(&state),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@school.com", "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    let token = body["accessToken"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_email_is_case_insensitive(pool: SqlitePool) {
    let state = test_state(pool);
    create_teacher(&state, "bob@ecam.be", None).await;

    get_auth_token(setup_test_app(&state), "BOB@ECAM.BE", TEST_PASSWORD).await;
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_with_wrong_credentials(pool: SqlitePool) {
    let state = test_state(pool);
    create_student(&state, "alice@school.com", None).await;

    let attempts = [
        json!({ "email": "alice@school.com", "password": "wrongpass" }),
        json!({ "email": "nobody@school.com", "password": TEST_PASSWORD }),
    ];

    for payload in attempts {
        let (status, body) = send(
            setup_test_app(&state),
            "POST",
            "/api/auth/login",
            None,
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        // Unknown email and wrong password look the same.
        assert_eq!(body["error"], "Invalid email or password");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_missing_fields(pool: SqlitePool) {
    let state = test_state(pool);

    let (status, _) = send(
        setup_test_app(&state),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "alice@school.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        setup_test_app(&state),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_without_role_is_refused(pool: SqlitePool) {
    let state = test_state(pool);
    state
        .identities
        .create(
            &state.db,
            PersonCreate {
                first_name: None,
                last_name: None,
                email: "orphan@school.com".to_string(),
                password: TEST_PASSWORD.to_string(),
            },
        )
        .await
        .unwrap();

    let (status, _) = send(
        setup_test_app(&state),
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "orphan@school.com", "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_reflects_token(pool: SqlitePool) {
    let state = test_state(pool);
    let admin = create_admin(&state, "admin@ecam.be").await;
    let teacher = create_teacher(&state, "bob@ecam.be", Some("T-001")).await;

    let token = get_auth_token(setup_test_app(&state), "admin@ecam.be", TEST_PASSWORD).await;
    let (status, me) = send(setup_test_app(&state), "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, json!({ "id": admin.person_id.get(), "role": "admin" }));

    let token = get_auth_token(setup_test_app(&state), "bob@ecam.be", TEST_PASSWORD).await;
    let (status, me) = send(setup_test_app(&state), "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, json!({ "id": teacher.person_id.get(), "role": "teacher" }));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_me_rejects_bad_tokens(pool: SqlitePool) {
    let state = test_state(pool);

    let (status, _) = send(setup_test_app(&state), "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        setup_test_app(&state),
        "GET",
        "/api/auth/me",
        Some("not.a.token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}
