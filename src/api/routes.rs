use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Search pages
        .route("/search/movies", post(handlers::search_movies))
        .route("/search/movies/:theme", post(handlers::search_movies))
        .route("/search/tracks", post(handlers::search_tracks))
        .route("/search/tracks/:theme", post(handlers::search_tracks))
        // Film pagination
        .route("/load_more", post(handlers::load_more))
        // Request ID first, so the trace span can read it
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}
