#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use ecam::modules::admins::AdminRole;
use ecam::modules::students::StudentRole;
use ecam::modules::teachers::TeacherRole;
use ecam::router::init_router;
use ecam::state::AppState;
use ecam_auth::Role;
use ecam_config::jwt::{DEFAULT_AUDIENCE, DEFAULT_ISSUER};
use ecam_config::{CorsConfig, JwtConfig};
use ecam_core::BcryptHasher;
use ecam_models::{
    AdminDto, CreateAdminDto, CreateStudentDto, CreateTeacherDto, IdentityId, StudentDto,
    TeacherDto,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "pass123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        issuer: DEFAULT_ISSUER.to_string(),
        audience: DEFAULT_AUDIENCE.to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state(pool: SqlitePool) -> AppState {
    AppState::new(
        pool,
        &test_jwt_config(),
        Arc::new(BcryptHasher::new(4)),
        CorsConfig {
            allowed_origins: vec![],
        },
    )
}

pub fn setup_test_app(state: &AppState) -> Router {
    init_router(state.clone())
}

pub async fn create_admin(state: &AppState, email: &str) -> AdminDto {
    let dto = CreateAdminDto {
        first_name: Some("Ada".to_string()),
        last_name: Some("Admin".to_string()),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
    };
    state
        .role_service::<AdminRole>()
        .create_from_dto(&state.db, &dto)
        .await
        .unwrap()
}

pub async fn create_student(state: &AppState, email: &str, matricule: Option<&str>) -> StudentDto {
    let dto = CreateStudentDto {
        first_name: Some("Alice".to_string()),
        last_name: Some("Martin".to_string()),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        matricule: matricule.map(str::to_string),
        study_year: Some("BA1".to_string()),
        option_code: None,
    };
    state
        .role_service::<StudentRole>()
        .create_from_dto(&state.db, &dto)
        .await
        .unwrap()
}

pub async fn create_teacher(state: &AppState, email: &str, code: Option<&str>) -> TeacherDto {
    let dto = CreateTeacherDto {
        first_name: Some("Bob".to_string()),
        last_name: Some("Prof".to_string()),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        teacher_code: code.map(str::to_string),
    };
    state
        .role_service::<TeacherRole>()
        .create_from_dto(&state.db, &dto)
        .await
        .unwrap()
}

/// Signs a token directly, bypassing login.
pub fn token_for(state: &AppState, identity_id: IdentityId, role: Role) -> String {
    state
        .tokens
        .issue_access_token(identity_id.get(), role)
        .unwrap()
}

pub async fn get_auth_token(app: Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["accessToken"].as_str().unwrap().to_string()
}

/// Sends one request and returns the status with the JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
