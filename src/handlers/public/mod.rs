// Public handlers: no authentication

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service name, version and endpoint map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Medical Records API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "exams": "/exams/user/:userId, /exams, /exams/download?id= (protected)",
            "user_surgeries": "/user-surgeries, /user-surgeries/:id, /user-surgeries/user/:userId (protected)",
            "catalog": "/surgeries, /diseases (protected)",
        }
    }))
}

/// GET /health - 503 when the record store does not answer
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
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
