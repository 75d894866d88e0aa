use common::models::{CurrentConditions, Forecast, ForecastEntry};
use reqwest::Client;
use thiserror::Error;
use tracing::error;

/// Any failed fetch. Non-success statuses, transport failures, and malformed
/// bodies all collapse into this one error; the cause is logged for
/// diagnostics but never shown to the user in detail.
#[derive(Debug, Error)]
#[error("city not found or request failed")]
pub struct FetchError {
    detail: String,
}

impl FetchError {
    fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Client for the weather server's query endpoints.
///
/// Requests are single-attempt with no timeout; failure handling is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// GET `/api/weather?city=<city>`.
    pub async fn current_weather(&self, city: &str) -> Result<CurrentConditions, FetchError> {
        let conditions = self
            .get_json::<CurrentConditions>("weather", city)
            .await
            .map_err(|e| {
                error!(city = %city, error = %e.detail(), "Error fetching weather data");
                e
            })?;
        Ok(conditions)
    }

    /// GET `/api/forecast?city=<city>`, unwrapped to the entry list.
    pub async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, FetchError> {
        let forecast = self.get_json::<Forecast>("forecast", city).await.map_err(|e| {
            error!(city = %city, error = %e.detail(), "Error fetching forecast data");
            e
        })?;
        Ok(forecast.list)
    }

    async fn get_json<T>(&self, resource: &str, city: &str) -> Result<T, FetchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!(
            "{}/api/{}?city={}",
            self.base_url,
            resource,
            urlencoding::encode(city)
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(format!("{} returned {}", url, status)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| FetchError::new(e.to_string()))
    }
}
