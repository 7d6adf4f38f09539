use crate::api::{error_response, message_response, ErrorResponse, MessageResponse};
use crate::favourites::{parse_id, StoreError};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[utoipa::path(
    delete,
    path = "/api/favourites/{id}",
    tag = "favourites",
    params(
        ("id" = String, Path, description = "Favourite ID")
    ),
    responses(
        (status = 200, description = "Favourite removed", body = MessageResponse),
        (status = 400, description = "Missing id", body = ErrorResponse),
        (status = 404, description = "Favourite not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_favourite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let result = match parse_id(&id) {
        Ok(id) => state.favourites.remove(id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            tracing::info!(%id, "favourite removed");
            message_response(StatusCode::OK, "Favourite removed")
        }
        Err(e) => store_error_response(e),
    }
}

/// `DELETE /api/favourites/` with the id segment left off.
pub async fn delete_favourite_without_id() -> impl IntoResponse {
    store_error_response(StoreError::Validation("Missing id param".to_string()))
}

fn store_error_response(e: StoreError) -> Response {
    match e {
        StoreError::Validation(message) => error_response(StatusCode::BAD_REQUEST, &message),
        StoreError::NotFound => error_response(StatusCode::NOT_FOUND, "Favourite not found"),
        StoreError::Storage(detail) => {
            tracing::error!("Failed to delete favourite: {}", detail);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to delete favourite",
            )
        }
    }
}
