use axum::{
    extract::{Query, State},
    response::Json,
};
use chrono::DateTime;
use common::errors::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::api_client::OpenWeatherClient;
use crate::cache::ResponseCache;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<OpenWeatherClient>,
    pub cache: Arc<ResponseCache>,
}

#[derive(Deserialize, IntoParams)]
pub struct CityQuery {
    /// City name, free text
    pub city: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub cache: CacheReport,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CacheReport {
    pub weather: TableReport,
    pub forecast: TableReport,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TableReport {
    pub count: i64,
    /// RFC 3339 timestamp of the most recent entry, if any
    pub latest: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check")
    )
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "weather-server" }))
}

#[utoipa::path(
    get,
    path = "/api/weather",
    params(CityQuery),
    responses(
        (status = 200, description = "Current conditions in the upstream OpenWeather shape"),
        (status = 404, description = "City not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Result<Json<Value>, AppError> {
    info!(city = %params.city, "Weather request received");

    let body = state.client.current_weather(&params.city).await?;

    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/forecast",
    params(CityQuery),
    responses(
        (status = 200, description = "5-day / 3-hour forecast in the upstream OpenWeather shape"),
        (status = 404, description = "City not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Result<Json<Value>, AppError> {
    info!(city = %params.city, "Forecast request received");

    let body = state.client.forecast(&params.city).await?;

    Ok(Json(body))
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Service status and cache statistics", body = StatusResponse)
    )
)]
pub async fn get_status(State(state): State<AppState>) -> Result<Json<StatusResponse>, AppError> {
    let stats = state.cache.stats().await?;

    Ok(Json(StatusResponse {
        status: "ok".to_string(),
        cache: CacheReport {
            weather: TableReport {
                count: stats.weather.count,
                latest: stats.weather.latest.map(to_rfc3339),
            },
            forecast: TableReport {
                count: stats.forecast.count,
                latest: stats.forecast.latest.map(to_rfc3339),
            },
        },
    }))
}

fn to_rfc3339(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
