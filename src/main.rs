mod common;
mod config;
mod gemini;
mod geo;
mod ui;

use clap::Parser;
use dotenvy::dotenv;
use tokio::sync::mpsc;

use gemini::{GeminiWorker, GroundingService};
use geo::Locator;
use ui::ChatApp;

#[derive(Parser)]
#[command(
    name = "grounded_chat",
    version,
    about = "Gemini chat grounded by Google Search or nearby places"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    // Khởi tạo Logger để debug
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    let api_key = app_config.resolve_api_key();
    if api_key.is_none() {
        log::warn!("No Gemini API key configured; every prompt will get an apology reply");
    }

    // 1. Tạo các kênh giao tiếp (Channels)
    // UI -> Worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    // 2. Khởi chạy Gemini worker (Chạy ngầm)
    let service = GroundingService::new(
        api_key,
        app_config.model.clone(),
        app_config.base_url.clone(),
    );
    let locator = Locator::new(app_config.geolocation_url.clone());
    tokio::spawn(async move {
        GeminiWorker::new(service, locator, event_tx, cmd_rx)
            .run()
            .await;
    });

    // 3. Khởi chạy UI (Chạy trên Main Thread)
    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Grounded AI Chat",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("ChatApp should only be initialized once");

            log::info!("Client started with model {}", app_config.model);

            Ok(Box::new(ChatApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
