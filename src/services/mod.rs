//! Service layer modules for external integrations.
//!
//! Contains the generative model seam, the Gemini client behind it, and the
//! estimation client built on top.

pub mod estimator;
pub mod gemini;
pub mod model;
pub mod prompt;

pub use estimator::{EstimationClient, RetryPolicy};
pub use gemini::GeminiClient;
pub use model::GenerativeModel;
