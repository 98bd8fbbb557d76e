use anyhow::Context;
use coinscope::application::client::AppClient;
use coinscope::application::highlights::HighlightsSettings;
use coinscope::application::listing::ListingSettings;
use coinscope::application::market_app::MarketApp;
use coinscope::config::Config;
use coinscope::infrastructure::ServiceFactory;

use tracing::{Level, info};
use tracing_subscriber::prelude::*;

fn main() -> anyhow::Result<()> {
    // 0. Load Env (before starting anything)
    dotenvy::dotenv().ok();

    // 1. Logging
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("Starting Coinscope...");

    // 2. Config
    let config = Config::from_env().context("Failed to load config")?;

    // 3. Runtime for background fetches; lives until the window closes
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("coinscope-io")
        .build()
        .context("Failed to build Tokio runtime")?;

    // 4. Wire services
    let service = ServiceFactory::create_market_data_service(&config);
    let client = AppClient::new(
        runtime.handle().clone(),
        service,
        ListingSettings::from_config(&config),
        HighlightsSettings::new(config.coingecko.vs_currency.clone(), &config.highlights),
    );
    let app = MarketApp::new(
        client,
        config.listing.default_sort,
        config.listing.search_debounce,
    );

    // 5. Run UI (blocks main thread)
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Coinscope"),
        ..Default::default()
    };

    eframe::run_native("Coinscope", native_options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    info!("Window closed, shutting down");
    runtime.shutdown_background();
    Ok(())
}
