use crate::api::{error_response, message_response, ErrorResponse, MessageResponse};
use crate::favourites::{CreateOutcome, FavouriteInput, StoreError};
use crate::models::Favourite;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateFavouriteResponse {
    pub message: String,
    pub favourite: Favourite,
}

#[utoipa::path(
    post,
    path = "/api/favourites",
    tag = "favourites",
    request_body = FavouriteInput,
    responses(
        (status = 201, description = "Recipe saved", body = CreateFavouriteResponse),
        (status = 200, description = "Recipe was already saved", body = MessageResponse),
        (status = 400, description = "Missing recipeId or title", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_favourite(
    State(state): State<AppState>,
    payload: Result<Json<FavouriteInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(input) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected favourite body: {}", rejection);
            return error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match state.favourites.create(input).await {
        Ok(CreateOutcome::Created(favourite)) => {
            tracing::info!(id = %favourite.id, recipe_id = %favourite.recipe_id, "favourite added");
            (
                StatusCode::CREATED,
                Json(CreateFavouriteResponse {
                    message: "Added to favourites".to_string(),
                    favourite,
                }),
            )
                .into_response()
        }
        Ok(CreateOutcome::AlreadyExists) => {
            message_response(StatusCode::OK, "Already in favourites")
        }
        Err(StoreError::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, &message)
        }
        Err(e) => {
            tracing::error!("Failed to save favourite: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save favourite",
            )
        }
    }
}
