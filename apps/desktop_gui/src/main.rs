mod backend_bridge;
mod controller;
mod ui;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, PredictionClient};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::{PredictorApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(about = "Titanic survival prediction form")]
struct Args {
    /// Base URL of the prediction backend; overrides predictor.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    /// Pre-fills the passenger name field.
    #[arg(long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let settings = load_settings()
        .context("failed to load client settings")?
        .with_api_base_url(args.api_url)
        .context("invalid --api-url")?;
    let client = PredictionClient::new(&settings).context("failed to build prediction client")?;
    tracing::info!(endpoint = %client.endpoint(), "prediction client configured");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let _worker = runtime::launch(cmd_rx, ui_tx, Arc::new(client));

    let startup = StartupConfig {
        api_base_url: settings.api_base_url.clone(),
        name: args.name,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Titanic Survival Predictor")
            .with_inner_size([1040.0, 720.0])
            .with_min_inner_size([760.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Titanic Survival Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(PredictorApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop window failed: {err}"))
}
