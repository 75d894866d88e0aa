//! Backend proxy for the weather panel.
//!
//! Exposes `/api/weather` and `/api/forecast` query endpoints that forward
//! to OpenWeather with a per-city SQLite response cache, plus `/api/status`
//! for cache statistics.

pub mod api_client;
pub mod cache;
pub mod config;
pub mod handlers;
pub mod openapi;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: handlers::AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/weather", get(handlers::get_weather))
        .route("/api/forecast", get(handlers::get_forecast))
        .route("/api/status", get(handlers::get_status))
        .merge(openapi::swagger_ui())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
