//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Panics rendered as JSON 500s
//! - JSON 404 for unknown routes, JSON 405 for unsupported methods
//! - Trailing slashes ignored (`/people/` is `/people`)
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{Method, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::config::{FavoritesConfig, DEFAULT_PORT};
use crate::db::Catalog;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Favorite endpoint settings
    pub favorites: FavoritesConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            favorites: FavoritesConfig::default(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub favorites: FavoritesConfig,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>, favorites: FavoritesConfig) -> Self {
        Self { catalog, favorites }
    }
}

/// Fallback for paths no router matched
async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NoRoute {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}

/// Fallback for known paths hit with an unsupported method
async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_owned(),
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");

    ApiError::Internal {
        message: format!("handler panicked: {}", detail),
    }
    .into_response()
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::health::router())
        .merge(routes::users::router())
        .merge(routes::people::router())
        .merge(routes::planets::router())
        .merge(routes::favorites::router())
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(Arc::new(state));

    // Path rewriting has to happen before routing, so it wraps the inner router
    Router::new()
        .fallback_service(NormalizePath::trim_trailing_slash(api))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let catalog = PgCatalog::connect(&database_url).await?;
/// run_server(Arc::new(catalog), ServerConfig::default()).await?;
/// ```
pub async fn run_server(catalog: Arc<dyn Catalog>, config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        storage = catalog.backend(),
        default_user_id = config.favorites.default_user_id,
        duplicates = %config.favorites.duplicates,
        "Favorites configured"
    );

    let app = build_router(AppState::new(catalog, config.favorites));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
