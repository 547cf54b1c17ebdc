mod app;
mod charts;
mod color;
mod config;
mod data;
mod pipeline;
mod state;
mod ui;

use app::ExoHabApp;
use config::Config;
use data::fetch::FetchError;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };

    let source = pipeline::source_from_config(&config);
    let output = match pipeline::run(source.as_ref(), &config) {
        Ok(output) => output,
        Err(e) => {
            log::error!("Pipeline failed: {e:#}");
            if e
                .downcast_ref::<FetchError>()
                .is_some_and(FetchError::is_retryable)
            {
                log::error!("The catalog service may be temporarily unavailable; run again later");
            }
            std::process::exit(1);
        }
    };
    let state = AppState::new(output, &config.display, source.describe());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Exoplanet Habitability Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(ExoHabApp::new(state)))),
    )
}
