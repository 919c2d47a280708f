use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Gemini
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub gemini_timeout_seconds: Option<u64>,

    // Estimation
    pub estimate_max_retries: u32,
}

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Environment::from_str(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // Gemini (API_KEY kept for older deployments)
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .filter(|k| !k.trim().is_empty())
            .context("GEMINI_API_KEY must be set")?;
        let gemini_api_url =
            lookup("GEMINI_API_URL").unwrap_or_else(|| DEFAULT_GEMINI_API_URL.to_string());
        url::Url::parse(&gemini_api_url)
            .with_context(|| format!("GEMINI_API_URL is not a valid URL: {}", gemini_api_url))?;
        let gemini_model =
            lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let gemini_timeout_seconds = lookup("GEMINI_TIMEOUT_SECONDS")
            .map(|s| {
                s.parse::<u64>()
                    .with_context(|| format!("GEMINI_TIMEOUT_SECONDS must be an integer: {}", s))
            })
            .transpose()?;

        // Estimation
        let estimate_max_retries = lookup("ESTIMATE_MAX_RETRIES")
            .map(|s| {
                s.parse::<u32>()
                    .with_context(|| format!("ESTIMATE_MAX_RETRIES must be an integer: {}", s))
            })
            .transpose()?
            .unwrap_or(0); // single call by default

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            gemini_api_key,
            gemini_api_url,
            gemini_model,
            gemini_timeout_seconds,
            estimate_max_retries,
        })
    }
}
