use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current conditions for a city, in the upstream OpenWeather shape.
///
/// The server proxies these bodies verbatim; the panel deserializes them.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CurrentConditions {
    /// Canonical city name as resolved by the provider
    pub name: String,
    pub sys: CountryInfo,
    pub weather: Vec<ConditionSummary>,
    pub main: CurrentMeasurements,
    pub wind: Wind,
}

impl CurrentConditions {
    /// First condition summary, if the provider returned any.
    pub fn condition(&self) -> Option<&ConditionSummary> {
        self.weather.first()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CountryInfo {
    /// ISO 3166 country code, e.g. "FR"
    pub country: String,
}

/// Icon code and human-readable description for one weather condition
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ConditionSummary {
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CurrentMeasurements {
    /// Temperature in Celsius (the proxy requests metric units)
    pub temp: f64,
    pub feels_like: f64,
    /// Relative humidity in percent
    pub humidity: u32,
    /// Pressure in hPa
    pub pressure: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Wind {
    /// Wind speed in meters per second
    pub speed: f64,
}

/// 5-day / 3-hour forecast, in the upstream OpenWeather shape
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

/// One 3-hour forecast slot
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ForecastEntry {
    /// Timestamp formatted as "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
    pub weather: Vec<ConditionSummary>,
    pub main: ForecastMeasurements,
}

impl ForecastEntry {
    /// Date portion of `dt_txt`, everything before the first space.
    pub fn date(&self) -> &str {
        self.dt_txt
            .split_once(' ')
            .map_or(self.dt_txt.as_str(), |(date, _)| date)
    }

    pub fn condition(&self) -> Option<&ConditionSummary> {
        self.weather.first()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ForecastMeasurements {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}
