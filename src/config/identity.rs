use std::env;

use crate::error::AppError;

const DEFAULT_BASE_URL: &str = "https://identitytoolkit.googleapis.com";

/// Identity provider endpoint configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// API key appended to every identity toolkit request.
    pub api_key: String,
    /// Endpoint base, overridable for self-hosted or test deployments.
    pub base_url: String,
}

impl IdentityConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("TRIPLAB_IDENTITY_API_KEY").map_err(|_| {
            AppError::config("TRIPLAB_IDENTITY_API_KEY must be set".to_string())
        })?;
        let base_url = env::var("TRIPLAB_IDENTITY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}
