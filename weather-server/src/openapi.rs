use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use common::models::{CurrentConditions, Forecast};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_weather,
        handlers::get_forecast,
        handlers::get_status,
    ),
    components(schemas(
        CurrentConditions,
        Forecast,
        handlers::StatusResponse,
        handlers::CacheReport,
        handlers::TableReport,
    )),
    tags(
        (name = "weather", description = "Proxied weather data endpoints"),
        (name = "status", description = "Service and cache status"),
    ),
)]
struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
