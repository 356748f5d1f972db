// handlers/protected/auth/whoami.rs - GET /whoami handler

use axum::extract::{Extension, State};

use crate::api::format::ProfileResponse;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::UserRepository;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /whoami - profile of the authenticated caller
pub async fn whoami_get(State(state): State<AppState>, Extension(caller): Extension<Caller>) -> ApiResult<ProfileResponse> {
    let user = UserRepository::new(state.pool.clone()).find_by_id(caller.user_id).await?;
    Ok(ApiResponse::success(ProfileResponse::from(user)))
}
