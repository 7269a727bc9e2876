mod test_utils;

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn create_project_then_list() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let saved = app.create(&token, "projects", &[
        ("title", json!("Demo")),
        ("description", json!("Demo project")),
        ("technologies", json!("React, Go, ")),
    ]).await;

    assert_eq!(saved["technologies"], json!(["React", "Go"]));
    assert!(saved["id"].is_string());

    let response = app.admin(Method::GET, "/projects", &token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let state: Value = response.json().await.unwrap();
    assert_eq!(state["items"].as_array().unwrap().len(), 1);
    assert_eq!(state["editing"], false);
    assert!(state["draft"].is_null());
}

#[actix_rt::test]
async fn new_draft_carries_defaults() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin(Method::POST, "/tech-stack/new", &token).send().await.unwrap();

    let state: Value = response.json().await.unwrap();
    assert_eq!(state["editing"], true);
    assert_eq!(state["draft"]["mode"], "new");
    assert_eq!(state["draft"]["fields"]["visible"], true);
    assert_eq!(state["draft"]["fields"]["order_index"], 0);
    assert_eq!(state["can_save"], false);
}

#[actix_rt::test]
async fn invalid_draft_is_rejected_and_kept() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    app.admin(Method::POST, "/projects/new", &token).send().await.unwrap();
    app.fill_draft(&token, "projects", &[("title", json!("Only a title"))]).await;

    let response = app.admin(Method::POST, "/projects/draft/save", &token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "description");

    let state: Value = app.admin(Method::GET, "/projects", &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(state["editing"], true);
    assert_eq!(state["draft"]["fields"]["title"], "Only a title");
    assert!(state["items"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn unknown_field_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.admin(Method::POST, "/posts/new", &token).send().await.unwrap();

    let response = app.admin(Method::PATCH, "/posts/draft", &token)
        .json(&json!({ "field": "author", "value": "me" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn editing_without_a_draft_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin(Method::PATCH, "/projects/draft", &token)
        .json(&json!({ "field": "title", "value": "x" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn edit_updates_in_place() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let saved = app.create(&token, "projects", &[
        ("title", json!("Before")),
        ("description", json!("desc")),
    ]).await;
    let id = saved["id"].as_str().unwrap();

    let response = app.admin(Method::POST, &format!("/projects/{id}/edit"), &token)
        .send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let state: Value = response.json().await.unwrap();
    assert_eq!(state["draft"]["mode"], "editing");
    assert_eq!(state["draft"]["id"], id);

    app.fill_draft(&token, "projects", &[("title", json!("After"))]).await;
    let body: Value = app.admin(Method::POST, "/projects/draft/save", &token)
        .send().await.unwrap()
        .json().await.unwrap();

    assert_eq!(body["saved"]["id"], id);
    assert_eq!(body["saved"]["title"], "After");
    assert_eq!(body["state"]["items"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn editing_unknown_id_is_not_found() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin(Method::POST, &format!("/projects/{}/edit", uuid::Uuid::new_v4()), &token)
        .send().await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn malformed_id_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin(Method::DELETE, "/projects/42?confirm=true", &token)
        .send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn delete_requires_confirmation() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    let saved = app.create(&token, "tech-stack", &[
        ("name", json!("Rust")),
        ("icon", json!("SiRust")),
    ]).await;
    let id = saved["id"].as_str().unwrap();

    let declined: Value = app.admin(Method::DELETE, &format!("/tech-stack/{id}"), &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(declined["deleted"], false);
    assert_eq!(declined["prompt"], "Are you sure you want to delete this technology?");
    assert_eq!(declined["state"]["items"].as_array().unwrap().len(), 1);

    let confirmed: Value = app.admin(Method::DELETE, &format!("/tech-stack/{id}?confirm=true"), &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(confirmed["deleted"], true);
    assert!(confirmed["state"]["items"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn deleting_missing_row_records_error_until_dismissed() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin(Method::DELETE, &format!("/posts/{}?confirm=true", uuid::Uuid::new_v4()), &token)
        .send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let state: Value = app.admin(Method::GET, "/posts", &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert!(state["error"].is_string());

    let state: Value = app.admin(Method::POST, "/posts/error/dismiss", &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert!(state["error"].is_null());
}

#[actix_rt::test]
async fn cancel_discards_the_draft() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.admin(Method::POST, "/posts/new", &token).send().await.unwrap();

    let state: Value = app.admin(Method::DELETE, "/posts/draft", &token)
        .send().await.unwrap()
        .json().await.unwrap();

    assert_eq!(state["editing"], false);
    assert!(state["draft"].is_null());
}

#[actix_rt::test]
async fn post_save_derives_slug_and_published_at() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let saved = app.create(&token, "posts", &[
        ("title", json!("Hello, World!")),
        ("content", json!("Body")),
        ("tags", json!("rust, web")),
        ("published", json!(true)),
    ]).await;

    assert_eq!(saved["slug"], "hello-world");
    assert_eq!(saved["tags"], json!(["rust", "web"]));
    assert!(saved["published_at"].is_string());
}

#[actix_rt::test]
async fn dashboard_switches_tabs_and_keeps_drafts() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let view: Value = app.admin(Method::GET, "/dashboard", &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(view["active_tab"], "projects");
    assert_eq!(view["tabs"].as_array().unwrap().len(), 3);

    app.admin(Method::POST, "/projects/new", &token).send().await.unwrap();
    app.fill_draft(&token, "projects", &[("title", json!("Half done"))]).await;

    let view: Value = app.admin(Method::PUT, "/dashboard/tab", &token)
        .json(&json!({ "tab": "tech-stack" }))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(view["active_tab"], "tech-stack");
    assert_eq!(view["panel"]["editing"], false);

    let view: Value = app.admin(Method::PUT, "/dashboard/tab", &token)
        .json(&json!({ "tab": "projects" }))
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(view["panel"]["draft"]["fields"]["title"], "Half done");
}

#[actix_rt::test]
async fn unknown_tab_is_bad_request() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let response = app.admin(Method::PUT, "/dashboard/tab", &token)
        .json(&json!({ "tab": "gallery" }))
        .send().await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn duplicate_slug_is_a_conflict_and_keeps_the_draft() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.create(&token, "posts", &[
        ("title", json!("Same Title")),
        ("content", json!("first")),
    ]).await;

    app.admin(Method::POST, "/posts/new", &token).send().await.unwrap();
    app.fill_draft(&token, "posts", &[
        ("title", json!("Same Title")),
        ("content", json!("second")),
    ]).await;

    let response = app.admin(Method::POST, "/posts/draft/save", &token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Slug already exists"));

    let state: Value = app.admin(Method::GET, "/posts", &token)
        .send().await.unwrap()
        .json().await.unwrap();
    assert_eq!(state["editing"], true);
    assert_eq!(state["draft"]["fields"]["content"], "second");
    assert_eq!(state["draft"]["fields"]["slug"], "");
    assert_eq!(state["items"].as_array().unwrap().len(), 1);
    assert!(state["error"].as_str().unwrap().contains("Slug already exists"));
}
