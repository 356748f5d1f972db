use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Path, State,
};
use axum::Json;

use super::EntryPayload;
use crate::api::format::EntryResponse;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::EntryRepository;
use crate::handlers::protected::resource_id;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /entries/:id - any entry by id; ownership is not checked on read
pub async fn get(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> ApiResult<EntryResponse> {
    let id = resource_id(path, "Entry")?;
    let entry = EntryRepository::new(state.pool.clone()).find(id).await?;
    Ok(ApiResponse::success(EntryResponse::from(entry)))
}

/// PUT /entries/:id - replace title, body and topics; the caller becomes owner
pub async fn put(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> ApiResult<()> {
    let id = resource_id(path, "Entry")?;
    let Json(payload) = payload?;

    EntryRepository::new(state.pool.clone())
        .update(&caller, id, payload.into())
        .await?;

    Ok(ApiResponse::no_content())
}

/// DELETE /entries/:id
pub async fn delete(State(state): State<AppState>, path: Result<Path<i64>, PathRejection>) -> ApiResult<()> {
    let id = resource_id(path, "Entry")?;
    EntryRepository::new(state.pool.clone()).delete(id).await?;
    Ok(ApiResponse::no_content())
}
