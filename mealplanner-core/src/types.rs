use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A recipe returned by a search, normalised from the upstream response.
/// Never persisted; favourites carry the same fields plus an id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Percent-encoded upstream recipe URI
    pub recipe_id: String,
    pub title: String,
    pub image: String,
    pub source_url: String,
    pub calories: Option<f64>,
    pub ready_in_minutes: Option<f64>,
    /// Diet labels followed by health labels
    pub diets: Vec<String>,
}
