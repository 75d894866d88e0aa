//! Maintenance tool for the weather response cache.

use clap::{Parser, Subcommand};
use weather_server::cache::{CacheTable, ResponseCache};
use weather_server::config::Config;

#[derive(Debug, Parser)]
#[command(name = "cache-manager", version, about = "Weather cache maintenance")]
struct Cli {
    /// Path to the cache database; defaults to DATABASE_PATH or data/weather_cache.db
    #[arg(long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show cache statistics and the most recent entries
    View,
    /// Delete all cached entries
    Clear,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env();
    let database = cli.database.unwrap_or(config.database_path);

    let cache = ResponseCache::open(&database, config.cache_ttl_seconds).await?;

    match cli.command {
        Command::View => view(&cache).await?,
        Command::Clear => {
            let (weather, forecast) = cache.clear().await?;
            println!(
                "Cache cleared: {weather} weather entries and {forecast} forecast entries deleted."
            );
        }
    }

    Ok(())
}

async fn view(cache: &ResponseCache) -> Result<(), Box<dyn std::error::Error>> {
    let stats = cache.stats().await?;

    println!("\n=== Weather Cache Status ===\n");
    println!("Current weather entries: {}", stats.weather.count);
    println!("Forecast entries: {}", stats.forecast.count);

    println!("\n=== Recent Weather Cache Entries ===\n");
    let entries = cache.recent(CacheTable::Weather, 10).await?;
    if entries.is_empty() {
        println!("No entries found in the cache.");
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    for (city, timestamp) in entries {
        let expiry = timestamp + cache.ttl_seconds();
        let status = if now < expiry { "Valid" } else { "Expired" };

        println!("City: {city}");
        println!("  Cached at: {}", format_ts(timestamp));
        println!("  Expires at: {}", format_ts(expiry));
        println!("  Status: {status}");
        println!();
    }

    Ok(())
}

fn format_ts(unix: i64) -> String {
    chrono::DateTime::from_timestamp(unix, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| unix.to_string())
}
