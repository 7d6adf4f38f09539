use crate::api::{error_response, ErrorResponse};
use crate::models::Favourite;
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavouritesResponse {
    /// Newest first
    pub favourites: Vec<Favourite>,
}

#[utoipa::path(
    get,
    path = "/api/favourites",
    tag = "favourites",
    responses(
        (status = 200, description = "All saved recipes, newest first", body = FavouritesResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_favourites(State(state): State<AppState>) -> impl IntoResponse {
    match state.favourites.list().await {
        Ok(favourites) => (StatusCode::OK, Json(FavouritesResponse { favourites })).into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch favourites: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch favourites",
            )
        }
    }
}
