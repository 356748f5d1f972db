// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::api::format::TokenResponse;
use crate::app::AppState;
use crate::auth::{issue_token, verify_password};
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login - exchange credentials for a token.
/// Unknown users and wrong passwords get the same 401.
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let Json(request) = payload?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_username(&request.username)
        .await?;

    let user = match user {
        Some(user) if verify_password(&request.password, &user.password) => user,
        _ => {
            tracing::warn!("Failed login attempt for '{}'", request.username);
            return Err(ApiError::unauthorized("Invalid username or password"));
        }
    };

    let token = issue_token(user.id, &user.username, &state.config.security)?;
    tracing::info!("User '{}' logged in", user.username);

    Ok(ApiResponse::success(TokenResponse { token }))
}
