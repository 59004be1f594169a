use agent_registry::app::app::App;
use agent_registry::config::LogConfig;
use agent_registry::util::logger::Logger;
use dotenv::dotenv;
use tracing::{error, info, warn};


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading any configuration, logging included
    let dotenv_result = dotenv();

    let _logger = Logger::new(&LogConfig::from_env())?;
    info!("🚀 Starting Agent Registry");

    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = App::new().await.map_err(|e| {
        error!("Failed to initialize application: {}", e);
        e
    })?;
    app.start().await
}
