use chairtime_api::config::ApiConfig;
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration, an invalid slot window stops startup here
    let config = ApiConfig::from_env()?;

    // Start API server
    chairtime_api::start_server(config).await?;

    Ok(())
}
