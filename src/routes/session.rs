use axum::{extract::rejection::JsonRejection, response::IntoResponse, Json};

use crate::api::DataResponse;
use crate::domain::users::{demo_user, LoginRequest};
use crate::error::{ApiError, ApiResult};

/// Mock login: pick a role, get the matching demo user.
///
/// POST /session
pub async fn login(payload: Result<Json<LoginRequest>, JsonRejection>) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let user = demo_user(req.role)
        .ok_or_else(|| ApiError::BadRequest("Choose a client or admin role to log in".to_string()))?;

    tracing::info!(username = %user.username, role = ?user.role, "Demo login");

    Ok(DataResponse::new(user))
}
