//! Terminal frontend for the weather panel.

use clap::Parser;
use common::tracing::init_tracing_pretty;
use std::env;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use weather_panel::{ApiClient, Controller, FileLastCityStore, SearchOutcome};

#[derive(Debug, Parser)]
#[command(name = "weather-panel", version, about = "Weather panel client")]
struct Cli {
    /// One-shot search for this city, then exit
    #[arg(long)]
    city: Option<String>,

    /// Base URL of the weather server; defaults to WEATHER_SERVER_URL
    #[arg(long)]
    server: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_pretty();

    let cli = Cli::parse();
    let base_url = cli
        .server
        .or_else(|| env::var("WEATHER_SERVER_URL").ok())
        .unwrap_or_else(|| "http://localhost:8000".to_string());

    let store_path = FileLastCityStore::default_path()
        .ok_or("Could not determine platform data directory")?;
    let store = FileLastCityStore::new(store_path);

    let mut controller = Controller::new(ApiClient::new(base_url), store);

    if let Some(city) = cli.city {
        run_search(&mut controller, &city).await;
        return Ok(());
    }

    // Replay the last successful search before taking input
    if let Some(city) = controller.startup_city() {
        println!("Replaying last search: {city}");
        run_search(&mut controller, &city).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt().await?;
    while let Some(line) = lines.next_line().await? {
        // Blank input is ignored silently
        run_search(&mut controller, &line).await;
        prompt().await?;
    }

    Ok(())
}

async fn run_search(controller: &mut Controller<FileLastCityStore>, city: &str) {
    if controller.search(city).await == SearchOutcome::Ignored {
        return;
    }
    print!("{}", controller.panel());
}

async fn prompt() -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"\nCity: ").await?;
    stdout.flush().await
}
