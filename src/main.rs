use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use eframe::egui;

use claims_dashboard::app::ClaimsDashboardApp;
use claims_dashboard::config::Config;
use claims_dashboard::data::aggregate::Dashboard;
use claims_dashboard::data::filter::FilteredView;
use claims_dashboard::data::loader::load_file;
use claims_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env();
    log::debug!("{config:?}");

    // Loaded exactly once; every recomputation borrows this copy.
    let dataset = match load_file(&config.data_path) {
        Ok(ds) => Arc::new(ds),
        Err(e) => {
            log::error!("Failed to load claims: {e}");
            return Err(e).context("loading claims dataset");
        }
    };

    if config.summary_only {
        let summary = Dashboard::compute(&FilteredView::all(&dataset), config.top_n);
        let json = serde_json::to_string_pretty(&summary).context("serialising summary")?;
        println!("{json}");
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    let state = AppState::new(dataset, config.top_n);
    eframe::run_native(
        "Health Insurance Claims Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(ClaimsDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
