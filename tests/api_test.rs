//! Integration tests for API endpoints.
//!
//! Each test builds the real router over a store backed by a temp file
//! and drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use flatfile_users::api::{create_router, AppState};
use flatfile_users::services::UserManager;

fn test_app(dir: &TempDir) -> Router {
    let manager = UserManager::open(dir.path().join("users.json")).expect("store should open");
    create_router(AppState::new(Arc::new(manager)))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_user() -> Value {
    json!({
        "firstName": "John",
        "secondName": "Doe",
        "birthDate": "1990-05-17"
    })
}

#[tokio::test]
async fn create_replies_created_with_location() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_request("POST", "/users", sample_user()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/users/1"
    );

    let body = response_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["href"], "/users/1");
}

#[tokio::test]
async fn create_rejects_missing_attribute() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let body = json!({"firstName": "John", "secondName": "Doe"});
    let response = app
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_rejects_malformed_birth_date() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let body = json!({
        "firstName": "John",
        "secondName": "Doe",
        "birthDate": "17.05.1990"
    });
    let response = app
        .oneshot(json_request("POST", "/users", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_returns_the_stored_user() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    app.clone()
        .oneshot(json_request("POST", "/users", sample_user()))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/users/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body, sample_user());
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app.oneshot(get_request("/users/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn list_returns_references_for_all_users() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    for body in [
        sample_user(),
        json!({"firstName": "Jane", "secondName": "Smith", "birthDate": "1985-11-02"}),
    ] {
        app.clone()
            .oneshot(json_request("POST", "/users", body))
            .await
            .unwrap();
    }

    let response = app.oneshot(get_request("/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body, json!([
        {"id": 1, "href": "/users/1"},
        {"id": 2, "href": "/users/2"}
    ]));
}

#[tokio::test]
async fn list_honors_query_filters() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    for body in [
        json!({"firstName": "John", "secondName": "Doe", "birthDate": "1990-05-17"}),
        json!({"firstName": "John", "secondName": "Smith", "birthDate": "1985-11-02"}),
        json!({"firstName": "Jane", "secondName": "Doe", "birthDate": "1991-06-18"}),
    ] {
        app.clone()
            .oneshot(json_request("POST", "/users", body))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(get_request("/users?firstName=John"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let response = app
        .oneshot(get_request("/users?firstName=John&secondName=Doe"))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body, json!([{"id": 1, "href": "/users/1"}]));
}

#[tokio::test]
async fn update_changes_only_supplied_attributes() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    app.clone()
        .oneshot(json_request("POST", "/users", sample_user()))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/users/1",
            json!({"secondName": "Smith"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["secondName"], "Smith");
    assert_eq!(body["birthDate"], "1990-05-17");
}

#[tokio::test]
async fn update_with_no_attributes_is_bad_request() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    app.clone()
        .oneshot(json_request("POST", "/users", sample_user()))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("PUT", "/users/1", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/users/42",
            json!({"secondName": "Smith"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_replies_no_content_then_user_is_gone() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    app.clone()
        .oneshot(json_request("POST", "/users", sample_user()))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get_request("/users/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_user_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_reports_storage_status() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir);

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"]["status"], "healthy");
}
