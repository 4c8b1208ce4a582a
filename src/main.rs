use t2t_translators::app_config::AppConfig;
use t2t_translators::probe::probe;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    tracing_subscriber::fmt().with_max_level(config.core().log_level()).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("✅  Loaded configuration with {} device(s)", config.devices().len());

    let mut failures = 0;
    for entry in config.devices() {
        match probe(entry, &config).await {
            Ok(state) => info!("💡 {}: {}", entry.name(), state),
            Err(e) => {
                failures += 1;
                warn!("⚠️ Unable to probe '{}': {}", entry.name(), e);
            }
        }
    }

    info!("🔥 Probed {} device(s), {} failed", config.devices().len(), failures);
    Ok(())
}
