#![allow(dead_code)]

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use portfolio_admin::{
    auth::password::hash_password,
    entities::token::{AuthResponse, LoginRequest},
    middlewares::auth::AuthMiddleware,
    routes::configure_routes,
    settings::{AppConfig, AppEnvironment, StoreBackend},
    shared_repos::SharedStores,
    AppState,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use std::{net::TcpListener, time::Duration};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "AdminPass123!";

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub config: AppConfig,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(SharedStores::in_memory()).await
    }

    pub async fn spawn_with(stores: SharedStores) -> Self {
        let config = test_config();
        let state = web::Data::new(AppState::new(&config, stores));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .wrap(NormalizePath::trim())
                .wrap(AuthMiddleware)
                .configure(configure_routes)
        })
        .listen(listener)
        .expect("Failed to bind server")
        .workers(config.worker_count)
        .run();

        tokio::spawn(server);

        let client = Client::new();
        while client.get(&address).send().await.is_err() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        Self { address, client, config }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.client
            .post(self.url("/api/v1/auth/login"))
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .expect("Failed to send login request")
    }

    pub async fn admin_token(&self) -> String {
        let response = self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await;
        assert_eq!(response.status(), 200);
        let auth: AuthResponse = response.json().await.unwrap();
        auth.access_token
    }

    pub fn admin(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(&format!("/api/v1/admin{}", path)))
            .bearer_auth(token)
    }

    /// Sets each `(field, value)` on the open draft of `resource`.
    pub async fn fill_draft(&self, token: &str, resource: &str, fields: &[(&str, Value)]) {
        for (field, value) in fields {
            let response = self
                .admin(Method::PATCH, &format!("/{}/draft", resource), token)
                .json(&serde_json::json!({ "field": field, "value": value }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), 200, "setting {field}");
        }
    }

    /// Opens a new draft, fills it and saves it, returning the saved row.
    pub async fn create(&self, token: &str, resource: &str, fields: &[(&str, Value)]) -> Value {
        let response = self
            .admin(Method::POST, &format!("/{}/new", resource), token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        self.fill_draft(token, resource, fields).await;

        let response = self
            .admin(Method::POST, &format!("/{}/draft/save", resource), token)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        body["saved"].clone()
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio Admin Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        store_backend: StoreBackend::Memory,
        database_url: String::new(),
        cors_allowed_origins: vec!["*".to_string()],
        jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512_1234567890".into(),
        jwt_expiration_minutes: 5,
        admin_email: ADMIN_EMAIL.into(),
        admin_password_hash: hash_password(ADMIN_PASSWORD).expect("Failed to hash admin password"),
    }
}
