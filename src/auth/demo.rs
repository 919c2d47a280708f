use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::users::{demo_user, User, UserRole};
use crate::error::ApiError;

/// Header carrying the role picked on the demo login screen.
pub const X_DEMO_ROLE: &str = "x-demo-role";

/// Extractor for a logged-in demo user.
///
/// Example:
/// ```ignore
/// async fn dashboard(session: DemoSession) -> impl IntoResponse {
///     format!("Hello, {}", session.name)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DemoSession(pub User);

impl std::ops::Deref for DemoSession {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

const LOGIN_REQUIRED: &str = "Please log in to view dashboard.";

#[async_trait]
impl FromRequestParts<Arc<AppState>> for DemoSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let role = parts
            .headers
            .get(X_DEMO_ROLE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized(LOGIN_REQUIRED.to_string()))?;

        let role: UserRole = role.parse().map_err(|e: String| {
            tracing::warn!(error = %e, "Rejected demo role");
            ApiError::Unauthorized(LOGIN_REQUIRED.to_string())
        })?;

        demo_user(role)
            .map(DemoSession)
            .ok_or_else(|| ApiError::Unauthorized(LOGIN_REQUIRED.to_string()))
    }
}
