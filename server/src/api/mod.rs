pub mod favourites;
pub mod health;
pub mod search;

use crate::AppState;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

pub(crate) fn error_response(status: StatusCode, error: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// All API routes. Methods not listed for a path get a 405 with an `Allow` header.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/search", get(search::search_recipes))
        .route(
            "/api/favourites",
            get(favourites::list::list_favourites).post(favourites::create::create_favourite),
        )
        .route(
            "/api/favourites/",
            delete(favourites::delete::delete_favourite_without_id),
        )
        .route(
            "/api/favourites/{id}",
            delete(favourites::delete::delete_favourite),
        )
}

/// The complete OpenAPI document, merged from each module's `ApiDoc`
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "mealplanner", description = "Recipe search and favourites API"),
        components(schemas(ErrorResponse, MessageResponse))
    )]
    struct BaseApi;

    let mut doc = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        health::ApiDoc::openapi(),
        search::ApiDoc::openapi(),
        favourites::ApiDoc::openapi(),
    ];

    for module_doc in modules {
        doc.paths.paths.extend(module_doc.paths.paths);

        if let Some(module_components) = module_doc.components {
            if let Some(doc_components) = doc.components.as_mut() {
                doc_components.schemas.extend(module_components.schemas);
            }
        }
    }

    doc
}
