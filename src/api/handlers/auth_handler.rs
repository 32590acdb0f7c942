//! Sign-up and sign-in.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(length(min = 3, max = 50, message = "must be between 3 and 50 characters"))]
    #[schema(example = "coach_k")]
    pub username: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "coach_k")]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}

/// Register a new user and return a token
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "User registered", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignUpRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .auth()
        .sign_up(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/auth/sign-in",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .auth()
        .sign_in(payload.username, payload.password)
        .await?;

    Ok(Json(token))
}
