//! Recipe API configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Edamam Recipe Search v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.edamam.com/api/recipes/v2";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Credentials and endpoint for the external recipe API.
#[derive(Debug, Clone)]
pub struct RecipeApiConfig {
    /// Application id, also sent as the `Edamam-Account-User` header.
    pub app_id: String,
    pub app_key: String,
    pub base_url: String,
}

impl RecipeApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `RECIPE_API_ID`
    /// - `RECIPE_API_KEY`
    ///
    /// Optional:
    /// - `RECIPE_API_BASE_URL` (default: the Edamam v2 endpoint)
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_id = required("RECIPE_API_ID")?;
        let app_key = required("RECIPE_API_KEY")?;
        let base_url = env::var("RECIPE_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            app_id,
            app_key,
            base_url,
        })
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}
