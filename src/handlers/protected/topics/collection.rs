use axum::extract::{rejection::JsonRejection, Extension, State};
use axum::Json;

use super::TopicPayload;
use crate::api::format::TopicResponse;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::TopicRepository;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /topics - every topic, whoever owns it
pub async fn get(State(state): State<AppState>) -> ApiResult<Vec<TopicResponse>> {
    let topics = TopicRepository::new(state.pool.clone()).list().await?;
    Ok(ApiResponse::success(topics.into_iter().map(TopicResponse::from).collect()))
}

/// POST /topics - create a topic owned by the caller (201)
pub async fn post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<TopicPayload>, JsonRejection>,
) -> ApiResult<TopicResponse> {
    let Json(payload) = payload?;

    let topic = TopicRepository::new(state.pool.clone())
        .create(&caller, payload.into())
        .await?;

    Ok(ApiResponse::created(TopicResponse::from(topic)))
}
