use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Path, State,
};
use axum::Json;

use super::TopicPayload;
use crate::api::format::TopicResponse;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::TopicRepository;
use crate::handlers::protected::resource_id;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /topics/:id
pub async fn get(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> ApiResult<TopicResponse> {
    let id = resource_id(path, "Topic")?;
    let topic = TopicRepository::new(state.pool.clone()).find(id).await?;
    Ok(ApiResponse::success(TopicResponse::from(topic)))
}

/// PUT /topics/:id - rename; the caller becomes owner
pub async fn put(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TopicPayload>, JsonRejection>,
) -> ApiResult<()> {
    let id = resource_id(path, "Topic")?;
    let Json(payload) = payload?;

    TopicRepository::new(state.pool.clone())
        .update(&caller, id, payload.into())
        .await?;

    Ok(ApiResponse::no_content())
}

/// DELETE /topics/:id
pub async fn delete(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    let id = resource_id(path, "Topic")?;
    TopicRepository::new(state.pool.clone()).delete(id).await?;
    Ok(ApiResponse::no_content())
}
