/// End-to-end tests for the HTTP surface
///
/// These drive the real router over the in-memory stores, so the full
/// request path (routing, validation, bearer guard, services, error
/// mapping) is exercised without a database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskledger_api::app::{build_router, AppState};
use taskledger_api::config::{ApiConfig, AuthConfig, Config, DatabaseConfig};
use taskledger_shared::store::memory::{InMemoryCredentialStore, InMemoryTaskStore};

const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

fn test_app() -> Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        auth: AuthConfig {
            token_secret: SECRET.to_string(),
            token_ttl_seconds: 3600,
        },
    };

    let state = AppState::new(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(InMemoryTaskStore::new()),
        config,
    );

    build_router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> Response {
    app.clone()
        .oneshot(post_json(
            "/auth/register",
            json!({"username": username, "password": password}),
        ))
        .await
        .unwrap()
}

async fn login_token(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": username, "password": password}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    body_json(response).await["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn end_to_end_scenario() {
    let app = test_app();

    // Register alice
    let response = register(&app, "alice", "pw1").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body.get("id").is_some());
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());

    // Registering alice again is a duplicate
    let response = register(&app, "alice", "pw2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Login with the original password
    let token = login_token(&app, "alice", "pw1").await;

    // Create a task
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/tasks",
            &token,
            Some(json!({"title": "buy milk"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await;
    assert_eq!(task["title"], "buy milk");
    assert_eq!(task["isComplete"], false);
    let task_id = task["id"].as_str().unwrap().to_string();

    // Mark it complete
    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/tasks/{}", task_id),
            &token,
            Some(json!({"title": "buy milk", "isComplete": true})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["isComplete"], true);

    // Delete it
    let response = app
        .clone()
        .oneshot(authed("DELETE", &format!("/tasks/{}", task_id), &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["message"].as_str().is_some());

    // The list is empty again
    let response = app
        .clone()
        .oneshot(authed("GET", "/tasks", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    // Touching the deleted id again is a 404
    let response = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/tasks/{}", task_id),
            &token,
            Some(json!({"title": "buy milk", "isComplete": true})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn register_validation_errors() {
    let app = test_app();

    let response = register(&app, "", "pw1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = register(&app, "alice", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_failures_are_identical() {
    let app = test_app();
    register(&app, "alice", "pw1").await;

    let unknown = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": "nonexistent", "password": "pw1"}),
        ))
        .await
        .unwrap();
    let wrong = app
        .clone()
        .oneshot(post_json(
            "/auth/login",
            json!({"username": "alice", "password": "wrong"}),
        ))
        .await
        .unwrap();

    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong.status(), StatusCode::BAD_REQUEST);

    // Identical bodies: no username enumeration
    assert_eq!(body_json(unknown).await, body_json(wrong).await);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = test_app();

    // No Authorization header
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/tasks")
                .header(header::AUTHORIZATION, "Basic abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let response = app
        .clone()
        .oneshot(authed("GET", "/tasks", "garbage", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let app = test_app();
    register(&app, "alice", "pw1").await;
    let token = login_token(&app, "alice", "pw1").await;

    // Flip a character in the signature
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = app
        .clone()
        .oneshot(authed("GET", "/tasks", &tampered, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn ownership_is_never_disclosed() {
    let app = test_app();

    register(&app, "alice", "pw1").await;
    register(&app, "bob", "pw2").await;
    let alice_token = login_token(&app, "alice", "pw1").await;
    let bob_token = login_token(&app, "bob", "pw2").await;

    // Alice creates a task
    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/tasks",
            &alice_token,
            Some(json!({"title": "alice task", "description": "private"})),
        ))
        .await
        .unwrap();
    let task_id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Bob cannot see it
    let response = app
        .clone()
        .oneshot(authed("GET", "/tasks", &bob_token, None))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));

    // Bob's update of Alice's task and of a random id are identical 404s
    let update = json!({"title": "hijacked", "isComplete": true});
    let foreign = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/tasks/{}", task_id),
            &bob_token,
            Some(update.clone()),
        ))
        .await
        .unwrap();
    let missing = app
        .clone()
        .oneshot(authed(
            "PUT",
            &format!("/tasks/{}", uuid::Uuid::new_v4()),
            &bob_token,
            Some(update),
        ))
        .await
        .unwrap();

    assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(foreign).await, body_json(missing).await);

    // Same for delete
    let response = app
        .clone()
        .oneshot(authed("DELETE", &format!("/tasks/{}", task_id), &bob_token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Alice's task survived untouched
    let response = app
        .clone()
        .oneshot(authed("GET", "/tasks", &alice_token, None))
        .await
        .unwrap();
    let tasks = body_json(response).await;
    assert_eq!(tasks[0]["title"], "alice task");
    assert_eq!(tasks[0]["isComplete"], false);
}

#[tokio::test]
async fn create_task_requires_title() {
    let app = test_app();
    register(&app, "alice", "pw1").await;
    let token = login_token(&app, "alice", "pw1").await;

    let response = app
        .clone()
        .oneshot(authed("POST", "/tasks", &token, Some(json!({"title": ""}))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_connected_store() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
