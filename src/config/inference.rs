use std::env;

use crate::error::AppError;

const DEFAULT_MODEL: &str = "llama3.2:1b";

/// Inference service endpoint configuration. The host is deployment-specific
/// (often a tunnel in front of a local model server), so it has no default.
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: String,
    pub model: String,
}

impl InferenceConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env::var("TRIPLAB_INFERENCE_BASE_URL").map_err(|_| {
            AppError::config("TRIPLAB_INFERENCE_BASE_URL must be set".to_string())
        })?;
        let model =
            env::var("TRIPLAB_INFERENCE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}
