//! Route modules for the OCR server

pub mod health;
pub mod ocr;
pub mod web;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(web::index))
        .route("/health", get(health::health_check))
        .merge(ocr::router().layer(DefaultBodyLimit::max(state.config().body_limit())));

    let static_dir = state.config().web.static_dir();
    if static_dir.is_dir() {
        tracing::info!(path = %static_dir.display(), "Serving static files");
        router = router.nest_service("/static", ServeDir::new(static_dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
