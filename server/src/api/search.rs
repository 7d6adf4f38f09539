use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use mealplanner_core::{SearchError, SearchResult};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text ingredient list, e.g. "chicken, rice"
    pub ingredients: Option<String>,
    /// One of high-protein, low-calorie, vegetarian, vegan. Anything else is ignored.
    pub diet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub recipes: Vec<SearchResult>,
}

#[utoipa::path(
    get,
    path = "/api/search",
    tag = "search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching recipes", body = SearchResponse),
        (status = 400, description = "Missing ingredients", body = ErrorResponse),
        (status = 500, description = "Recipe API failure", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let result = state
        .search
        .search(params.ingredients.as_deref(), params.diet.as_deref())
        .await;

    match result {
        Ok(recipes) => (StatusCode::OK, Json(SearchResponse { recipes })).into_response(),
        Err(SearchError::MissingIngredients) => error_response(
            StatusCode::BAD_REQUEST,
            "Missing 'ingredients' query param",
        ),
        // Details were logged by the gateway.
        Err(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to fetch recipes",
        ),
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(search_recipes),
    components(schemas(SearchResponse, SearchResult))
)]
pub struct ApiDoc;
