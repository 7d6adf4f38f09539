mod api;
mod config;
mod db;
mod favourites;
mod models;
mod schema;
mod telemetry;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::{header, HeaderValue, Method, Request};
use axum::Router;
use config::{Environment, ServerConfig};
use favourites::{FavouriteStore, PgFavouriteStore};
use mealplanner_core::{RecipeApiConfig, SearchGateway};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub favourites: Arc<dyn FavouriteStore>,
    pub search: Arc<SearchGateway>,
}

/// CORS policy: anything goes in development, an explicit allow-list in production.
/// Requests from other origins are served without CORS headers rather than rejected.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match config.environment {
        Environment::Development => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        Environment::Production => {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid allowed origin {:?}", origin);
                        None
                    }
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .max_age(Duration::from_secs(60 * 60))
        }
    }
}

fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    Router::new()
        .merge(api::router())
        .merge(swagger_ui)
        .fallback_service(ServeDir::new(&config.frontend_dir))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    // Health checks are polled constantly; keep them out of info logs
                    if matched_path == "/health" {
                        tracing::trace_span!("http_request")
                    } else {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %matched_path,
                        )
                    }
                })
                .on_request(|_request: &Request<_>, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: Duration, span: &Span| {
                        if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                            return;
                        }
                        let status = response.status().as_u16();
                        if status >= 500 {
                            tracing::error!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request failed with server error"
                            );
                        } else {
                            tracing::info!(
                                status = %status,
                                latency_ms = %latency.as_millis(),
                                "request completed"
                            );
                        }
                    },
                )
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: Duration,
                     _span: &Span| {
                        tracing::error!(
                            error = %error,
                            latency_ms = %latency.as_millis(),
                            "request failed"
                        );
                    },
                ),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --openapi dumps the API document and exits
    if env::args().any(|arg| arg == "--openapi") {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    telemetry::init_telemetry();

    // Refuse to start half-configured
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    let recipe_api = RecipeApiConfig::from_env().context("Invalid recipe API configuration")?;

    let pool = db::create_pool(&config.database_url)?;
    tracing::info!("Database connection pool ready");

    let search =
        SearchGateway::with_reqwest(recipe_api).context("Failed to build recipe API client")?;

    let state = AppState {
        favourites: Arc::new(PgFavouriteStore::new(pool)),
        search: Arc::new(search),
    };

    if config.environment == Environment::Production {
        tracing::info!(origins = ?config.allowed_origins, "CORS restricted to allowed origins");
    }

    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    let address = listener.local_addr()?;
    tracing::info!("Server listening on {}", address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", address);
    tracing::info!("Serving frontend from {}", config.frontend_dir.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{recipe_api_config, send};
    use crate::favourites::memory::MemoryFavouriteStore;
    use axum::body::Body;
    use axum::http::StatusCode;
    use mealplanner_core::MockClient;
    use std::path::PathBuf;

    fn config(environment: Environment) -> ServerConfig {
        ServerConfig {
            database_url: "postgres://unused".to_string(),
            port: 0,
            environment,
            allowed_origins: vec!["https://meals.example".to_string()],
            frontend_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../frontend"),
        }
    }

    fn test_app(environment: Environment) -> Router {
        let state = AppState {
            favourites: Arc::new(MemoryFavouriteStore::new()),
            search: Arc::new(SearchGateway::new(
                Arc::new(MockClient::new()),
                recipe_api_config(),
            )),
        };
        build_app(state, &config(environment))
    }

    fn from_origin(origin: &str) -> Request<Body> {
        Request::builder()
            .uri("/health")
            .header("origin", origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(Environment::Development);
        let (status, _, body) = send(&app, from_origin("http://anywhere.example")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_development_allows_any_origin() {
        let app = test_app(Environment::Development);
        let (_, headers, _) = send(&app, from_origin("http://anywhere.example")).await;
        assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    }

    #[tokio::test]
    async fn test_production_only_allows_listed_origins() {
        let app = test_app(Environment::Production);

        let (_, headers, _) = send(&app, from_origin("https://meals.example")).await;
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "https://meals.example"
        );

        let (status, headers, _) = send(&app, from_origin("https://evil.example")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.get("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_frontend_is_served_at_root() {
        let app = test_app(Environment::Development);
        let response = tower::ServiceExt::oneshot(
            app,
            Request::builder().uri("/").body(Body::empty()).unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = test_app(Environment::Development);
        let (status, _, body) = send(
            &app,
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/favourites"].is_object());
    }
}
