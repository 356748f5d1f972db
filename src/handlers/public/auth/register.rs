// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use crate::api::format::TokenResponse;
use crate::app::AppState;
use crate::auth::{hash_password, issue_token};
use crate::database::models::NewUser;
use crate::database::UserRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// POST /register - create a user and its profile, return a token (201)
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<TokenResponse> {
    let Json(request) = payload?;

    let username = required(request.username, "username")?;
    let password = required(request.password, "password")?;

    let new_user = NewUser {
        username,
        password_hash: hash_password(&password)?,
        first_name: request.first_name,
        last_name: request.last_name,
        email: request.email,
    };

    let (user, _profile) = UserRepository::new(state.pool.clone()).register(new_user).await?;
    let token = issue_token(user.id, &user.username, &state.config.security)?;

    Ok(ApiResponse::created(TokenResponse { token }))
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation_error(format!("Field '{}' is required", field))),
    }
}
