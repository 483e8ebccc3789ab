//! Integration tests for the HTTP routes and WebSocket authentication.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use card_room::{
    auth::{Identity, TokenVerifier},
    table::{TableConfig, TableManager},
};
use chrono::Duration;
use cr_server::api::{AppState, cors_layer, create_router};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // For `oneshot` method

const SECRET: &str = "test_secret_key_for_testing_only!";

async fn create_test_server() -> (Router, Arc<TableManager>) {
    let table_manager = Arc::new(TableManager::new(4));
    table_manager
        .create_table(TableConfig {
            name: "Table 1".to_string(),
            ..TableConfig::default()
        })
        .await
        .unwrap();

    let state = AppState {
        table_manager: table_manager.clone(),
        verifier: Arc::new(TokenVerifier::new(SECRET)),
    };
    (create_router(state, cors_layer(None)), table_manager)
}

fn token_for(secret: &str, id: &str) -> String {
    TokenVerifier::new(secret)
        .issue(&Identity::new(id, "Tester"), Duration::minutes(5))
        .unwrap()
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let (app, _) = create_test_server().await;
    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["tables"], 1);
}

#[tokio::test]
async fn test_list_tables() {
    let (app, manager) = create_test_server().await;
    manager
        .create_table(TableConfig {
            name: "Table 2".to_string(),
            small_blind: 5,
            big_blind: 10,
            ..TableConfig::default()
        })
        .await
        .unwrap();

    let (status, body) = get(app, "/tables").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    let tables = json.as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["name"], "Table 1");
    assert_eq!(tables[1]["big_blind"], 10);
    assert_eq!(tables[1]["phase"], "WAITING_FOR_PLAYERS");
}

#[tokio::test]
async fn test_get_table() {
    let (app, _) = create_test_server().await;
    let (status, body) = get(app.clone(), "/tables/1").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["seat_count"], 0);

    let (status, _) = get(app, "/tables/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_websocket_without_token_is_unauthorized() {
    let (app, _) = create_test_server().await;
    let (status, _) = get(app, "/ws/1").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_websocket_with_foreign_token_is_unauthorized() {
    let (app, _) = create_test_server().await;
    let token = token_for("some_other_secret_of_sufficient_size", "uid-1");
    let (status, body) = get(app, &format!("/ws/1?token={token}")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    // Token details aren't echoed back.
    assert_eq!(body, b"Authentication failed");
}

#[tokio::test]
async fn test_websocket_to_unknown_table_is_not_found() {
    let (app, _) = create_test_server().await;
    let token = token_for(SECRET, "uid-1");
    let (status, _) = get(app, &format!("/ws/9?token={token}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_websocket_requires_an_upgrade_request() {
    let (app, _) = create_test_server().await;
    let token = token_for(SECRET, "uid-1");
    let (status, _) = get(app, &format!("/ws/1?token={token}")).await;
    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_ne!(status, StatusCode::NOT_FOUND);
}
