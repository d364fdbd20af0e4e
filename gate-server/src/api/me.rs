use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::request_identity::RequestIdentity;

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub username: Option<String>,
    pub roles: Vec<String>,
}

/// GET /api/me - echo the authenticated identity
pub async fn get_me(identity: RequestIdentity) -> ApiResult<Json<MeResponse>> {
    let user = identity
        .user
        .ok_or_else(|| ApiError::unauthorized("A valid bearer token is required"))?;

    Ok(Json(MeResponse {
        user_id: user.user_id,
        username: user.username,
        roles: user.roles,
    }))
}
