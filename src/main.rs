use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod config;
mod models;
mod views;

use api::ApiClient;
use app::AdminApp;
use config::Config;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Fitness admin v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.api.base_url);

    let api = ApiClient::new(&config.api)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("Fitness Admin"),
        ..Default::default()
    };

    eframe::run_native(
        "Fitness Admin",
        options,
        Box::new(|cc| Ok(Box::new(AdminApp::new(cc, api)))),
    )?;

    Ok(())
}
