//! Construction cost estimation backed by a generative model.
//!
//! One estimate is one exchange: build the prompt, call the model, and
//! validate the returned text into an [`AIEstimateResponse`]. Nothing is
//! cached, so identical requests always reach the model.

use backoff::ExponentialBackoffBuilder;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use super::model::GenerativeModel;
use super::prompt::{build_estimate_prompt, GenerationConfig};
use crate::domain::estimate::{AIEstimateResponse, EstimationRequest};
use crate::error::EstimateError;

/// Retry policy for transport failures.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Extra attempts after the first call. Zero means a single call.
    pub max_retries: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
}

impl RetryPolicy {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(8),
        }
    }
}

#[derive(Clone)]
pub struct EstimationClient {
    model: Arc<dyn GenerativeModel>,
    retry: RetryPolicy,
}

impl EstimationClient {
    pub fn new(model: Arc<dyn GenerativeModel>, retry: RetryPolicy) -> Self {
        Self { model, retry }
    }

    pub fn model(&self) -> &Arc<dyn GenerativeModel> {
        &self.model
    }

    /// Produce a cost estimate for `request`.
    ///
    /// A blank location fails with [`EstimateError::Validation`] before the
    /// model is contacted.
    #[instrument(skip_all, fields(project_type = %request.project_type, quality = %request.quality))]
    pub async fn estimate(
        &self,
        request: &EstimationRequest,
    ) -> Result<AIEstimateResponse, EstimateError> {
        request.ensure_complete()?;

        let prompt = build_estimate_prompt(request);
        let config = GenerationConfig::for_estimate();

        let text = self.generate(&prompt, &config).await?;
        let estimate = parse_estimate(text.as_deref())?;

        info!(
            total = estimate.total_estimated_cost,
            currency = %estimate.currency,
            items = estimate.breakdown.len(),
            "Estimate generated"
        );

        Ok(estimate)
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Option<String>, EstimateError> {
        if self.retry.max_retries == 0 {
            return self.model.generate(prompt, config).await;
        }

        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.retry.initial_interval)
            .with_max_interval(self.retry.max_interval)
            .with_max_elapsed_time(None)
            .build();

        let model = &self.model;
        let max_retries = self.retry.max_retries;
        let mut attempt = 0u32;

        backoff::future::retry(policy, || {
            attempt += 1;
            let current = attempt;
            async move {
                model.generate(prompt, config).await.map_err(|e| {
                    if e.is_transient() && current <= max_retries {
                        warn!(attempt = current, error = %e, "AI call failed, retrying");
                        backoff::Error::transient(e)
                    } else {
                        backoff::Error::permanent(e)
                    }
                })
            }
        })
        .await
    }
}

/// Validate the model's text payload against the estimate schema.
pub fn parse_estimate(text: Option<&str>) -> Result<AIEstimateResponse, EstimateError> {
    let text = match text.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => return Err(EstimateError::EmptyResponse),
    };

    let estimate: AIEstimateResponse = serde_json::from_str(text)
        .map_err(|e| EstimateError::MalformedResponse(e.to_string()))?;
    estimate.validate().map_err(EstimateError::MalformedResponse)?;

    Ok(estimate)
}
