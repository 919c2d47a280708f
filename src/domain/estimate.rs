//! Estimation request and response models.
//!
//! Field names follow the camelCase wire format shared with the front end
//! and the generative model's response schema.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EstimateError;

/// Smallest area the estimate form accepts.
pub const MIN_AREA_SQ_FT: f64 = 100.0;
/// Inclusive floor-count bounds of the estimate form.
pub const MIN_FLOORS: i64 = 1;
pub const MAX_FLOORS: i64 = 50;

/// Material quality tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Quality {
    Standard,
    Premium,
    Luxury,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Standard => "Standard",
            Self::Premium => "Premium",
            Self::Luxury => "Luxury",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProjectType {
    Residential,
    Commercial,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
        };
        f.write_str(s)
    }
}

/// A complete set of project parameters for one estimate.
///
/// Numeric fields are deliberately loose (`f64` / `i64`): the estimation
/// client accepts any value and leaves range checks to [`EstimateForm`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRequest {
    pub area_sq_ft: f64,
    pub location: String,
    pub floors: i64,
    pub quality: Quality,
    pub project_type: ProjectType,
}

impl EstimationRequest {
    /// Minimal completeness check performed before any outbound call.
    pub fn ensure_complete(&self) -> Result<(), EstimateError> {
        if self.location.trim().is_empty() {
            return Err(EstimateError::Validation(
                "location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Estimate form as submitted by the user; every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateForm {
    #[serde(default)]
    pub area_sq_ft: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub floors: Option<i64>,
    #[serde(default)]
    pub quality: Option<Quality>,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
}

impl EstimateForm {
    /// Check presence and form bounds, producing a request ready to send.
    pub fn into_request(self) -> Result<EstimationRequest, EstimateError> {
        let area_sq_ft = self.area_sq_ft.ok_or_else(|| missing("areaSqFt"))?;
        let location = self.location.ok_or_else(|| missing("location"))?;
        let floors = self.floors.ok_or_else(|| missing("floors"))?;
        let quality = self.quality.ok_or_else(|| missing("quality"))?;
        let project_type = self.project_type.ok_or_else(|| missing("projectType"))?;

        if !area_sq_ft.is_finite() || area_sq_ft < MIN_AREA_SQ_FT {
            return Err(EstimateError::Validation(format!(
                "areaSqFt must be at least {}",
                MIN_AREA_SQ_FT
            )));
        }
        if !(MIN_FLOORS..=MAX_FLOORS).contains(&floors) {
            return Err(EstimateError::Validation(format!(
                "floors must be between {} and {}",
                MIN_FLOORS, MAX_FLOORS
            )));
        }

        let request = EstimationRequest {
            area_sq_ft,
            location: location.trim().to_string(),
            floors,
            quality,
            project_type,
        };
        request.ensure_complete()?;

        Ok(request)
    }
}

fn missing(field: &str) -> EstimateError {
    EstimateError::Validation(format!("{} is required", field))
}

/// One category of the cost breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdownItem {
    pub category: String,
    pub cost: f64,
    pub description: String,
}

/// Structured estimate returned by the generative model.
///
/// Breakdown order is display order. The breakdown is not required to sum
/// to `total_estimated_cost`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AIEstimateResponse {
    pub total_estimated_cost: f64,
    pub currency: String,
    pub timeline_months: f64,
    pub summary: String,
    pub breakdown: Vec<CostBreakdownItem>,
}

impl AIEstimateResponse {
    /// Value-level checks that serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        check_amount("totalEstimatedCost", self.total_estimated_cost)?;
        check_amount("timelineMonths", self.timeline_months)?;
        for (i, item) in self.breakdown.iter().enumerate() {
            if !item.cost.is_finite() {
                return Err(format!("breakdown[{}].cost is not a finite number", i));
            }
        }
        Ok(())
    }
}

fn check_amount(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 {
        return Err(format!("{} must be a non-negative number, got {}", field, value));
    }
    Ok(())
}
