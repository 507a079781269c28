//! Health check handler.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;

use crate::api::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub identity_store: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    /// Backing store: "postgres" or "memory"
    pub kind: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check endpoint - pings the database when one is configured.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store_health = match state.database.as_ref() {
        Some(db) => match db.ping().await {
            Ok(()) => ServiceHealth {
                kind: "postgres",
                status: "healthy",
                error: None,
            },
            Err(e) => ServiceHealth {
                kind: "postgres",
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        },
        None => ServiceHealth {
            kind: "memory",
            status: "healthy",
            error: None,
        },
    };

    let all_healthy = store_health.status == "healthy";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services: ServiceStatus {
            identity_store: store_health,
        },
    };

    let status_code = if all_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
