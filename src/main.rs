use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let config = pixfind::config::load_or_create_config()?;
    let _log_guard = pixfind::logging::init(&config)?;
    let registry = pixfind::search::ProviderRegistry::from_config(&config)?;
    pixfind::tui::run(config, registry).await
}
