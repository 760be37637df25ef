use super::{handlers, state::AppState};
use axum::{
    http::{HeaderName, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

/// The CORS policy applied to every response.
///
/// Any `OPTIONS` request is answered here as a preflight with `200` and an
/// empty body.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("accept-version"),
            HeaderName::from_static("content-length"),
            HeaderName::from_static("content-md5"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("date"),
            HeaderName::from_static("x-api-version"),
        ])
}

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    let static_dir = app_state
        .config
        .static_dir
        .clone()
        .filter(|dir| Path::new(dir).is_dir());

    let router = Router::new()
        .route(
            "/api/chat",
            post(handlers::chat_handler).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/health",
            get(handlers::health_check).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/whatsapp",
            get(handlers::verify_webhook)
                .post(handlers::receive_webhook)
                .fallback(handlers::whatsapp_method_not_allowed),
        )
        .with_state(app_state);

    // Serve the chat page from disk if configured; otherwise `/` is a plain
    // liveness line.
    let router = match static_dir {
        Some(dir) => {
            let index_path = Path::new(&dir).join("index.html");
            info!(path = %dir, "Static file serving enabled.");
            router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index_path)))
        }
        None => router.route("/", get(handlers::root)),
    };

    router
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
