use serde::Serialize;

/// A service package priced per square foot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingTier {
    pub title: String,
    pub price_per_sq_ft: f64,
    pub currency: String,
    pub features: Vec<String>,
    pub recommended: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingResponse {
    pub tiers: Vec<PricingTier>,
}

fn tier(title: &str, price: f64, features: &[&str], recommended: bool) -> PricingTier {
    PricingTier {
        title: title.to_string(),
        price_per_sq_ft: price,
        currency: "USD".to_string(),
        features: features.iter().map(|f| f.to_string()).collect(),
        recommended,
    }
}

pub fn pricing_tiers() -> Vec<PricingTier> {
    vec![
        tier(
            "Basic Residential",
            2.50,
            &[
                "2D Floor Planning",
                "Basic Structural Estimation",
                "Material quantity list",
                "Email Support",
            ],
            false,
        ),
        tier(
            "Premium Residential",
            4.50,
            &[
                "3D Architectural Modeling",
                "Detailed Structural Analysis",
                "Electrical & Plumbing Layouts",
                "Priority Phone Support",
                "Permit Assistance",
            ],
            true,
        ),
        tier(
            "Commercial",
            7.00,
            &[
                "Complete Civil Engineering",
                "HVAC & Fire Safety Planning",
                "Legal Compliance Check",
                "Dedicated Project Manager",
                "On-site Consultation",
            ],
            false,
        ),
    ]
}
