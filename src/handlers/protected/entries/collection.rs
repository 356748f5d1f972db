use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Extension, Query, State,
};
use axum::Json;

use super::EntryPayload;
use crate::api::format::EntryResponse;
use crate::app::AppState;
use crate::auth::Caller;
use crate::database::EntryRepository;
use crate::filter::EntryFilter;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /entries?title=&body= - the caller's entries, OR-filtered when both
/// substrings are given
pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: Result<Query<EntryFilter>, QueryRejection>,
) -> ApiResult<Vec<EntryResponse>> {
    let Query(filter) = query?;

    let entries = EntryRepository::new(state.pool.clone())
        .list_for_owner(&caller, &filter)
        .await?;

    Ok(ApiResponse::success(entries.into_iter().map(EntryResponse::from).collect()))
}

/// POST /entries - create an entry owned by the caller
pub async fn post(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> ApiResult<EntryResponse> {
    let Json(payload) = payload?;

    let entry = EntryRepository::new(state.pool.clone())
        .create(&caller, payload.into())
        .await?;

    Ok(ApiResponse::created(EntryResponse::from(entry)))
}
