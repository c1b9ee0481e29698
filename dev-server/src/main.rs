//! Development server for the donation dashboard UI
//!
//! Serves the mock donation backend from test-helpers on a fixed port, seeded
//! with requests in every status, so the UI can be developed without the real
//! backend.
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::fixtures::DevDataset;
use tracing::info;

const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = test_helpers::telemetry::get_subscriber("info".into());
    test_helpers::telemetry::init_subscriber(subscriber);

    let port = match std::env::var("DEV_SERVER_PORT") {
        Ok(port) => port.parse()?,
        Err(_) => DEFAULT_PORT,
    };

    info!("🚀 Starting donation dashboard development server");
    let app = test_helpers::spawn_app_on_port(port).await;

    info!("📊 Setting up development test data...");
    let dataset = DevDataset::create(&app.backend);

    info!("🎯 Development server ready!");
    info!("   API: {}", app.address);
    info!("   UI:  cd ui && BACKEND_URL={} trunk serve", app.address);
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
