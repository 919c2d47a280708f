//! Prompt and generation config for cost estimates.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::estimate::EstimationRequest;

/// Low temperature keeps repeated estimates close to each other.
pub const ESTIMATE_TEMPERATURE: f32 = 0.2;

pub const JSON_MIME_TYPE: &str = "application/json";

/// Generation parameters sent alongside the prompt.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
    pub temperature: f32,
}

impl GenerationConfig {
    pub fn for_estimate() -> Self {
        Self {
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema: estimate_schema(),
            temperature: ESTIMATE_TEMPERATURE,
        }
    }
}

/// Response schema the model must follow.
pub fn estimate_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "totalEstimatedCost": {
                "type": "NUMBER",
                "description": "Total estimated cost of the project in USD"
            },
            "currency": {
                "type": "STRING",
                "description": "Currency code, e.g., USD"
            },
            "timelineMonths": {
                "type": "NUMBER",
                "description": "Estimated time to completion in months"
            },
            "summary": {
                "type": "STRING",
                "description": "A professional summary of the estimation logic and key factors."
            },
            "breakdown": {
                "type": "ARRAY",
                "description": "Detailed breakdown of costs",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "description": "Category name (e.g., Materials, Labor, Permits)"
                        },
                        "cost": {
                            "type": "NUMBER",
                            "description": "Cost for this category"
                        },
                        "description": {
                            "type": "STRING",
                            "description": "Short explanation of this cost"
                        }
                    },
                    "required": ["category", "cost", "description"]
                }
            }
        },
        "required": ["totalEstimatedCost", "currency", "timelineMonths", "summary", "breakdown"]
    })
}

/// Render the instruction for one project.
///
/// Fields appear in a fixed order: project type, location, area, floors,
/// quality tier.
pub fn build_estimate_prompt(request: &EstimationRequest) -> String {
    format!(
        "You are a senior civil engineer and construction cost estimator.\n\
         Please provide a detailed cost estimation for a construction project with the following details:\n\
         \n\
         - Project Type: {}\n\
         - Location: {}\n\
         - Total Area: {} square feet\n\
         - Number of Floors: {}\n\
         - Material Quality Tier: {}\n\
         \n\
         Consider current market rates for labor and materials.\n\
         Be realistic about overheads, architectural fees, and structural requirements.\n\
         Return the data strictly in the requested JSON format.\n",
        request.project_type,
        request.location,
        request.area_sq_ft,
        request.floors,
        request.quality,
    )
}
