use std::env;

pub struct Config {
    pub port: u16,
    pub openweather_url: String,
    pub openweather_api_key: Option<String>,
    pub cache_ttl_seconds: u64,
    pub database_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            openweather_url: env::var("OPENWEATHER_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5".to_string()),
            openweather_api_key: env::var("OPENWEATHER_API_KEY").ok().filter(|k| !k.is_empty()),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600), // 1 hour default, matches the upstream refresh cadence
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/weather_cache.db".to_string()),
        }
    }
}
