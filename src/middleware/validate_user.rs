use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::AuthUser;
use crate::app::AppState;
use crate::database::UserRepository;
use crate::error::ApiError;

/// Resolves the token holder into a `Caller` (identity plus profile record).
/// Must run after `jwt_auth_middleware`. Tokens for removed users are rejected.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    let caller = UserRepository::new(state.pool.clone())
        .find_caller(auth_user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                "User validation failed: user '{}' (ID: {}) no longer exists",
                auth_user.username,
                auth_user.user_id
            );
            ApiError::unauthorized("User no longer exists")
        })?;

    tracing::debug!("Resolved caller '{}' (profile {})", caller.username, caller.commonplace_user_id);
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}
