use axum::response::IntoResponse;

use crate::api::DataResponse;
use crate::auth::DemoSession;
use crate::domain::Dashboard;
use crate::error::{ApiError, ApiResult};

/// Role-specific dashboard for the logged-in demo user.
///
/// GET /dashboard
pub async fn get_dashboard(session: DemoSession) -> ApiResult<impl IntoResponse> {
    tracing::debug!(username = %session.username, role = ?session.role, "Loading dashboard");

    let dashboard = Dashboard::for_user(session.0)
        .ok_or_else(|| ApiError::Unauthorized("Please log in to view dashboard.".to_string()))?;

    Ok(DataResponse::new(dashboard))
}
