// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here runs behind `jwt_auth_middleware` and
// `validate_user_middleware`, so handlers receive the resolved `Caller` as an
// extension and pass it on explicitly to the repositories.

pub mod auth;
pub mod entries;
pub mod topics;

use axum::extract::{rejection::PathRejection, Path};

use crate::error::ApiError;

/// Row ids come from the path; anything that is not an integer id cannot name a row
pub(crate) fn resource_id(path: Result<Path<i64>, PathRejection>, kind: &str) -> Result<i64, ApiError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Unparseable {} id: {}", kind, rejection.body_text());
            Err(ApiError::not_found(format!("{} not found", kind)))
        }
    }
}
