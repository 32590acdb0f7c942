//! Root, health and session-check endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::types::SuccessResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,
    pub services: ServiceHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub database: ServiceStatus,
    pub redis: ServiceStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(value_type = String, example = "healthy")]
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceStatus {
    fn from_result<E: std::fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }

    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

pub async fn root() -> &'static str {
    "Welcome to the Basketball League API"
}

/// Database and Redis connectivity
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All dependencies reachable", body = HealthResponse),
        (status = 503, description = "A dependency is down", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Response {
    let (database, redis) = tokio::join!(state.database.ping(), state.rate_limiter.ping());

    let database = ServiceStatus::from_result(database);
    let redis = ServiceStatus::from_result(redis);
    let healthy = database.is_healthy() && redis.is_healthy();

    if !healthy {
        tracing::warn!(
            database = database.status,
            redis = redis.status,
            "Health check degraded"
        );
    }

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: ServiceHealth { database, redis },
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response)).into_response()
}

/// Confirms the bearer token is accepted
#[utoipa::path(
    get,
    path = "/start",
    tag = "Health",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token accepted", body = SuccessResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn start() -> Json<SuccessResponse> {
    Json(SuccessResponse::ok())
}
