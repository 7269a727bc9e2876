mod test_utils;

use jsonwebtoken::{encode, EncodingKey, Header, Algorithm};
use portfolio_admin::entities::token::{AuthResponse, Claims};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn login_returns_bearer_token() {
    let app = TestApp::spawn().await;

    let response = app.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    let auth: AuthResponse = response.json().await.unwrap();
    assert!(!auth.access_token.is_empty());
    assert_eq!(auth.token_type, "Bearer");
    assert_eq!(auth.expires_in, 300);
}

#[actix_rt::test]
async fn login_email_is_case_insensitive() {
    let app = TestApp::spawn().await;

    let response = app.login("Admin@Example.com", ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn wrong_password_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.login(ADMIN_EMAIL, "nope").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Wrong credentials");
}

#[actix_rt::test]
async fn unknown_account_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.login("someone@example.com", ADMIN_PASSWORD).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn admin_routes_require_token() {
    let app = TestApp::spawn().await;

    let response = app.client
        .get(app.url("/api/v1/admin/projects"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn garbage_token_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app.admin(Method::GET, "/dashboard", "not.a.jwt").send().await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn non_admin_token_is_forbidden() {
    let app = TestApp::spawn().await;
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "reader@example.com".into(),
        admin: false,
        exp: now + 300,
        iat: now,
    };
    let token = encode(
        &Header::new(Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(app.config.jwt_secret.as_bytes()),
    )
    .unwrap();

    let response = app.admin(Method::GET, "/posts", &token).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn public_routes_need_no_token() {
    let app = TestApp::spawn().await;

    for path in ["/", "/api/v1/posts", "/api/v1/projects"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}
