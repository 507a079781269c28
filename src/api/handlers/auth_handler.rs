//! Authentication handlers.

use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};

use crate::api::extractors::JsonBody;
use crate::api::AppState;
use crate::config::MSG_USER_REGISTERED;
use crate::domain::{LoginRequest, RegisterRequest};
use crate::errors::AppResult;
use crate::services::TokenPair;
use crate::types::MessageResponse;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Field validation errors, e.g. {\"password\": [\"...\"]}")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state.auth_service.register(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(MSG_USER_REGISTERED)),
    ))
}

/// Login and get an access/refresh token pair
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenPair),
        (status = 400, description = "Username and password are required"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let tokens = state.auth_service.login(payload).await?;

    Ok(Json(tokens))
}
