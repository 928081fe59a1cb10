// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use boxtrack_core::{BoxStore, BoxtrackError};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The relational store behind every endpoint.
    pub store: Arc<dyn BoxStore>,
    /// Process start time for uptime reporting.
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create state over a store, stamping the start time now.
    pub fn new(store: Arc<dyn BoxStore>) -> Self {
        Self {
            store,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Server configuration (mirrors `ServerConfig` from `boxtrack-config` to
/// avoid a dependency on the config crate from this crate).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the full API router.
///
/// CORS is permissive: the dashboard UI is served from a separate origin,
/// as are scan devices on the warehouse network.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/health", get(handlers::health))
        .route(
            "/api/boxes",
            get(handlers::list_boxes).post(handlers::create_box),
        )
        .route(
            "/api/boxes/{box_id}",
            get(handlers::get_box).put(handlers::update_box),
        )
        .route("/api/boxes/{box_id}/retire", post(handlers::retire_box))
        .route("/api/boxes/{box_id}/history", get(handlers::box_history))
        .route("/api/boxes/{box_id}/qr", post(handlers::generate_qr))
        .route("/api/scan", post(handlers::scan))
        .route("/api/track/{box_id}", get(handlers::track))
        .route("/api/alerts", get(handlers::list_alerts))
        .route("/api/alerts/{id}/read", post(handlers::mark_alert_read))
        .route(
            "/api/settings",
            get(handlers::get_settings).post(handlers::put_setting),
        )
        .route("/api/dashboard/stats", get(handlers::dashboard_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server and serve until the task is cancelled.
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<(), BoxtrackError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BoxtrackError::Internal(format!("failed to bind server to {addr}: {e}")))?;

    tracing::info!("Boxtrack server listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| BoxtrackError::Internal(format!("server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use boxtrack_storage::SqliteStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let store = SqliteStore::open_in_memory().await.unwrap();
        build_router(AppState::new(Arc::new(store)))
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

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = test_app().await;
        let response = app.oneshot(get_request("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_then_fetch_box() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/boxes",
                json!({
                    "box_id": "BX-1123-98",
                    "type": "Plastic Container",
                    "manufacture_date": "2023-01-15"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(get_request("/api/boxes/BX-1123-98"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["type"], "Plastic Container");
        assert_eq!(body["status"], "active");
        assert_eq!(body["cycle_count"], 0);
    }

    #[tokio::test]
    async fn create_box_missing_fields_is_400() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request("POST", "/api/boxes", json!({"box_id": "BX-1"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn duplicate_create_is_409() {
        let app = test_app().await;
        let body = json!({
            "box_id": "BX-0001-00",
            "type": "Metal Crate",
            "manufacture_date": "2021-08-20"
        });
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/boxes", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request("POST", "/api/boxes", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn scan_unknown_box_is_404_and_history_stays_empty() {
        let app = test_app().await;
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/scan",
                json!({"box_id": "BX-9999-99", "action": "check_in"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(get_request("/api/boxes/BX-9999-99/history"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn scan_check_in_flow_updates_box_and_ledger() {
        let app = test_app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/boxes",
                json!({
                    "box_id": "BX-7789-34",
                    "type": "Metal Crate",
                    "manufacture_date": "2021-12-05"
                }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/scan",
                json!({
                    "box_id": "BX-7789-34",
                    "action": "check_in",
                    "location": "Shipping Area",
                    "actor_id": "scanner-2"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Scan processed");
        assert_eq!(body["status"], "active");
        assert_eq!(body["entry"]["action"], "check_in");

        let response = app
            .oneshot(get_request("/api/track/BX-7789-34"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["box"]["cycle_count"], 1);
        assert_eq!(body["box"]["location"], "Shipping Area");
        assert_eq!(body["history"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn scan_missing_action_is_400() {
        let app = test_app().await;
        let response = app
            .oneshot(json_request("POST", "/api/scan", json!({"box_id": "BX-1"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn retire_endpoint_records_through_ledger() {
        let app = test_app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/boxes",
                json!({
                    "box_id": "BX-3021-43",
                    "type": "Metal Crate",
                    "manufacture_date": "2021-08-20"
                }),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/boxes/BX-3021-43/retire",
                json!({"actor_id": "admin"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "retired");

        let response = app
            .oneshot(get_request("/api/boxes/BX-3021-43/history"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body[0]["action"], "retire");
    }

    #[tokio::test]
    async fn qr_endpoint_returns_payload_and_data_url() {
        let app = test_app().await;
        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/boxes",
                json!({
                    "box_id": "BX-4892-75",
                    "type": "Plastic Container",
                    "manufacture_date": "2022-03-15",
                    "location": "Warehouse A"
                }),
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/boxes/BX-4892-75/qr",
                json!({"location": "Dispatch Area"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(
            body["data"]
                .as_str()
                .unwrap()
                .starts_with("BX-4892-75|Plastic Container|0|Dispatch Area|")
        );
        assert!(
            body["qr"]
                .as_str()
                .unwrap()
                .starts_with("data:image/svg+xml;base64,")
        );
    }

    #[tokio::test]
    async fn settings_roundtrip_and_login() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(get_request("/api/settings"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["metal_max_cycles"], "200");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/settings",
                json!({"key": "metal_max_cycles", "value": "250"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Seeded admin logs in; wrong password is 401.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"username": "admin", "password": "admin123", "role": "admin"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["user"]["username"], "admin");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"username": "admin", "password": "wrong", "role": "admin"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn dashboard_stats_shape() {
        let app = test_app().await;
        let response = app
            .oneshot(get_request("/api/dashboard/stats"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["total_boxes"], 0);
        assert_eq!(body["usage_chart"], json!([0, 0, 0]));
        assert!(body["turnover_chart"]["labels"].as_array().unwrap().is_empty());
    }
}
