use common::tracing::init_tracing_pretty;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use weather_server::{api_client, cache, config, handlers, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let config = config::Config::from_env();
    if config.openweather_api_key.is_none() {
        warn!("OPENWEATHER_API_KEY is not set; live fetches will fail");
    }

    let cache = Arc::new(
        cache::ResponseCache::open(&config.database_path, config.cache_ttl_seconds).await?,
    );
    let client = Arc::new(api_client::OpenWeatherClient::new(
        cache.clone(),
        config.openweather_url.clone(),
        config.openweather_api_key.clone(),
    ));

    let state = handlers::AppState { client, cache };
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Weather server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Weather server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, starting graceful shutdown...");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
