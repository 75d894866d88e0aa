use common::errors::AppError;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Which of the two response tables an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTable {
    Weather,
    Forecast,
}

impl CacheTable {
    pub fn name(self) -> &'static str {
        match self {
            CacheTable::Weather => "weather_cache",
            CacheTable::Forecast => "forecast_cache",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableStats {
    pub count: i64,
    /// Unix timestamp of the most recently cached entry
    pub latest: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    pub weather: TableStats,
    pub forecast: TableStats,
}

/// SQLite-backed cache of raw upstream response bodies, one row per city.
pub struct ResponseCache {
    pool: SqlitePool,
    ttl_seconds: i64,
}

impl ResponseCache {
    /// Open (or create) the cache database at `path`.
    pub async fn open(path: &str, ttl_seconds: u64) -> Result<Self, AppError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::database(format!("Failed to create {:?}: {}", parent, e)))?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        let cache = Self {
            pool,
            ttl_seconds: ttl_seconds as i64,
        };
        cache.init_tables().await?;
        Ok(cache)
    }

    /// In-memory cache, used by tests. A single connection keeps one shared database.
    pub async fn in_memory(ttl_seconds: u64) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let cache = Self {
            pool,
            ttl_seconds: ttl_seconds as i64,
        };
        cache.init_tables().await?;
        Ok(cache)
    }

    async fn init_tables(&self) -> Result<(), AppError> {
        for table in [CacheTable::Weather, CacheTable::Forecast] {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    city TEXT PRIMARY KEY,
                    data TEXT,
                    timestamp INTEGER
                )
                "#,
                table.name()
            ))
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    /// Cached body for `city`, if present and younger than the TTL.
    /// City comparison is case-insensitive.
    pub async fn get(&self, table: CacheTable, city: &str) -> Result<Option<Value>, AppError> {
        let row: Option<(String, i64)> = sqlx::query_as(&format!(
            "SELECT data, timestamp FROM {} WHERE LOWER(city) = LOWER(?)",
            table.name()
        ))
        .bind(city)
        .fetch_optional(&self.pool)
        .await?;

        if let Some((data, timestamp)) = row
            && unix_now() - timestamp < self.ttl_seconds
        {
            let body: Value = serde_json::from_str(&data)?;
            return Ok(Some(body));
        }

        Ok(None)
    }

    /// Insert or replace the cached body for `city`.
    pub async fn put(&self, table: CacheTable, city: &str, body: &Value) -> Result<(), AppError> {
        sqlx::query(&format!(
            "INSERT OR REPLACE INTO {} (city, data, timestamp) VALUES (?, ?, ?)",
            table.name()
        ))
        .bind(city)
        .bind(body.to_string())
        .bind(unix_now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn stats(&self) -> Result<CacheStats, AppError> {
        Ok(CacheStats {
            weather: self.table_stats(CacheTable::Weather).await?,
            forecast: self.table_stats(CacheTable::Forecast).await?,
        })
    }

    async fn table_stats(&self, table: CacheTable) -> Result<TableStats, AppError> {
        let (count, latest): (i64, Option<i64>) = sqlx::query_as(&format!(
            "SELECT COUNT(*), MAX(timestamp) FROM {}",
            table.name()
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(TableStats { count, latest })
    }

    /// Most recently cached entries as (city, timestamp) pairs, newest first.
    pub async fn recent(
        &self,
        table: CacheTable,
        limit: i64,
    ) -> Result<Vec<(String, i64)>, AppError> {
        let rows = sqlx::query_as(&format!(
            "SELECT city, timestamp FROM {} ORDER BY timestamp DESC LIMIT ?",
            table.name()
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Delete every row from both tables; returns (weather, forecast) counts.
    pub async fn clear(&self) -> Result<(u64, u64), AppError> {
        let weather = sqlx::query("DELETE FROM weather_cache")
            .execute(&self.pool)
            .await?
            .rows_affected();
        let forecast = sqlx::query("DELETE FROM forecast_cache")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok((weather, forecast))
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get_returns_body() {
        let cache = ResponseCache::in_memory(3600).await.unwrap();
        let body = json!({"name": "Paris", "main": {"temp": 18.0}});

        cache.put(CacheTable::Weather, "Paris", &body).await.unwrap();
        let cached = cache.get(CacheTable::Weather, "Paris").await.unwrap();

        assert_eq!(cached, Some(body));
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let cache = ResponseCache::in_memory(3600).await.unwrap();
        let body = json!({"name": "London"});

        cache.put(CacheTable::Weather, "London", &body).await.unwrap();
        let cached = cache.get(CacheTable::Weather, "LONDON").await.unwrap();

        assert_eq!(cached, Some(body));
    }

    #[tokio::test]
    async fn tables_are_independent() {
        let cache = ResponseCache::in_memory(3600).await.unwrap();
        let body = json!({"list": []});

        cache.put(CacheTable::Forecast, "Paris", &body).await.unwrap();

        assert!(cache.get(CacheTable::Weather, "Paris").await.unwrap().is_none());
        assert!(cache.get(CacheTable::Forecast, "Paris").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn expired_entries_are_misses() {
        let cache = ResponseCache::in_memory(0).await.unwrap();
        let body = json!({"name": "Paris"});

        cache.put(CacheTable::Weather, "Paris", &body).await.unwrap();

        assert!(cache.get(CacheTable::Weather, "Paris").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stats_count_entries_per_table() {
        let cache = ResponseCache::in_memory(3600).await.unwrap();
        cache
            .put(CacheTable::Weather, "Paris", &json!({}))
            .await
            .unwrap();
        cache
            .put(CacheTable::Weather, "London", &json!({}))
            .await
            .unwrap();
        cache
            .put(CacheTable::Forecast, "Paris", &json!({}))
            .await
            .unwrap();

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.weather.count, 2);
        assert_eq!(stats.forecast.count, 1);
        assert!(stats.weather.latest.is_some());
    }

    #[tokio::test]
    async fn clear_empties_both_tables() {
        let cache = ResponseCache::in_memory(3600).await.unwrap();
        cache
            .put(CacheTable::Weather, "Paris", &json!({}))
            .await
            .unwrap();
        cache
            .put(CacheTable::Forecast, "Paris", &json!({}))
            .await
            .unwrap();

        let (weather, forecast) = cache.clear().await.unwrap();
        assert_eq!((weather, forecast), (1, 1));

        let stats = cache.stats().await.unwrap();
        assert_eq!(stats.weather.count, 0);
        assert_eq!(stats.weather.latest, None);
    }
}
