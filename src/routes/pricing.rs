use axum::response::IntoResponse;

use crate::api::DataResponse;
use crate::domain::pricing::{pricing_tiers, PricingResponse};

/// List the per-square-foot service packages.
///
/// GET /pricing
pub async fn list_pricing() -> impl IntoResponse {
    DataResponse::new(PricingResponse {
        tiers: pricing_tiers(),
    })
}
