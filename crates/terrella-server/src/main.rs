//! Server binary: serves planet renders over HTTP.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p terrella-server -- --port 8080`.

use std::process::ExitCode;

use clap::Parser;
use terrella_config::{CliArgs, Config, default_config_dir};
use terrella_server::RenderServer;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("could not load config ({e}), continuing with defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    terrella_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let mut server = RenderServer::new(config);
    if let Err(e) = server.start() {
        error!("failed to start render server: {e}");
        return ExitCode::FAILURE;
    }
    info!("terrella server ready on port {}", server.actual_port());

    server.join();
    ExitCode::SUCCESS
}
