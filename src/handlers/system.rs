use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::app::AppState;

/// GET / - service name, version and routes
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Employee API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "create": "POST /create",
            "list": "GET /employees",
            "update": "PUT /update",
            "delete": "DELETE /delete/:id",
            "health": "GET /health"
        }
    }))
}

/// GET /health - pings the store through the pool
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            let mut body = json!({
                "status": "degraded",
                "timestamp": now,
                "error": "database unavailable"
            });
            if state.expose_error_details {
                body["details"] = json!(e.message);
            }
            (StatusCode::SERVICE_UNAVAILABLE, Json(body))
        }
    }
}

/// Fallback for unknown routes, so every failure is still a JSON object.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}
