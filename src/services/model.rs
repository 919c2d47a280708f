use async_trait::async_trait;

use super::prompt::GenerationConfig;
use crate::error::EstimateError;

/// A text-generation backend.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run one generation. `Ok(None)` means the service answered without text.
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Option<String>, EstimateError>;

    async fn health_check(&self) -> anyhow::Result<()>;
}
