//! Ingredient-based recipe search against the Edamam Recipe Search API.

pub mod config;
pub mod diet;
pub mod normalize;

use std::sync::Arc;

use crate::error::SearchError;
use crate::http::{HttpClient, JsonRequest, ReqwestClient};
use crate::types::SearchResult;

pub use config::{ConfigError, RecipeApiConfig, DEFAULT_BASE_URL};
pub use diet::{diet_params, DietFilter, FilterParam};
pub use normalize::{encode_recipe_id, normalize_recipe, normalize_response, UNTITLED_RECIPE};

/// Header Edamam uses to attribute usage on accounts with active users tracking.
pub const ACCOUNT_USER_HEADER: &str = "Edamam-Account-User";

/// Translates search queries into upstream calls and normalises the results.
pub struct SearchGateway {
    client: Arc<dyn HttpClient>,
    config: RecipeApiConfig,
}

impl SearchGateway {
    pub fn new(client: Arc<dyn HttpClient>, config: RecipeApiConfig) -> Self {
        Self { client, config }
    }

    /// Gateway backed by a real HTTP client with default settings.
    pub fn with_reqwest(config: RecipeApiConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(Arc::new(ReqwestClient::new()?), config))
    }

    /// Build the upstream request for a query. `ingredients` must already be validated.
    pub fn build_request(&self, ingredients: &str, diet: Option<&str>) -> JsonRequest {
        let mut request = JsonRequest::get(&self.config.base_url)
            .query("type", "public")
            .query("q", ingredients)
            .query("app_id", &self.config.app_id)
            .query("app_key", &self.config.app_key)
            .header(ACCOUNT_USER_HEADER, &self.config.app_id);

        if let Some((param, value)) = diet_params(diet) {
            request = request.query(param, value);
        }

        request
    }

    /// Search for recipes containing `ingredients`, optionally filtered by diet.
    ///
    /// Upstream failures are logged here with whatever status and body the
    /// API returned; callers only see [`SearchError::Upstream`] or
    /// [`SearchError::MalformedResponse`].
    pub async fn search(
        &self,
        ingredients: Option<&str>,
        diet: Option<&str>,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let ingredients = ingredients
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(SearchError::MissingIngredients)?;

        let request = self.build_request(ingredients, diet);

        let body = self.client.get_json(&request).await.map_err(|e| {
            match &e {
                crate::FetchError::Status { status, body } => tracing::error!(
                    status = %status,
                    body = %body,
                    "Recipe API returned an error"
                ),
                other => tracing::error!(error = %other, "Error fetching recipes from recipe API"),
            }
            SearchError::Upstream(e)
        })?;

        let recipes = normalize_response(&body).inspect_err(|e| {
            tracing::error!(error = %e, "Recipe API returned an unusable body");
        })?;

        tracing::debug!(count = recipes.len(), "recipe search completed");
        Ok(recipes)
    }
}
