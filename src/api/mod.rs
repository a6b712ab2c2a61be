//! Local HTTP surface
//!
//! One route per playback command plus the OAuth helper routes.

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Liveness and health
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // OAuth helper routes
        .route("/callback", get(handlers::callback))
        .route("/token", get(handlers::token))
        // Playback commands
        .route("/spotify_play", post(handlers::play))
        .route("/spotify_pause", post(handlers::pause))
        .route("/spotify_resume", post(handlers::resume))
        .route("/spotify_skip", post(handlers::skip))
        .route("/spotify_previous", post(handlers::previous))
        .route("/spotify_now_playing", get(handlers::now_playing))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
