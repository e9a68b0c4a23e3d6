//! Command-line renderer: writes a PNG planet image to stdout or a file.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p terrella-cli -- --size 512 --longitude 151.2
//! --output sydney.png` to render a specific view.

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use terrella_assets::{TextureResolution, encode_png, load_equirect};
use terrella_config::{CliArgs, Config, default_config_dir};
use terrella_core::{RenderOptions, Rgba, render};
use tracing::{error, info};

/// Exit code when a required asset could not be read (ENOENT).
const EXIT_MISSING_ASSET: u8 = 2;
/// Exit code when writing the output failed (EIO).
const EXIT_OUTPUT_IO: u8 = 5;
/// Exit code when rendering or encoding failed (ENOTRECOVERABLE).
const EXIT_RENDER_FAILED: u8 = 131;

/// Assemble kernel options from the resolved configuration.
fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        size: config.output.size,
        background: Rgba::from(config.output.background),
        latitude: config.camera.latitude,
        longitude: config.camera.longitude,
        roll: config.camera.roll,
        zoom: config.camera.zoom,
        halo: config.camera.halo,
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("could not load config ({e}), continuing with defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);
    terrella_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let resolution = TextureResolution::for_render(config.output.size, config.camera.zoom);
    let texture = match load_equirect(&config.assets.texture_dir, resolution) {
        Ok(texture) => texture,
        Err(e) => {
            error!("error occurred while reading asset dependency: {e}");
            return ExitCode::from(EXIT_MISSING_ASSET);
        }
    };

    let options = render_options(&config);
    let canvas = match render(&options, &texture) {
        Ok(canvas) => canvas,
        Err(e) => {
            error!("internal error occurred during generation: {e}");
            return ExitCode::from(EXIT_RENDER_FAILED);
        }
    };
    let encoded = match encode_png(&canvas) {
        Ok(encoded) => encoded,
        Err(e) => {
            error!("internal error occurred during generation: {e}");
            return ExitCode::from(EXIT_RENDER_FAILED);
        }
    };

    let write_result = match args.output {
        Some(ref path) if path.as_os_str() != "-" => {
            std::fs::write(path, &encoded).map(|()| info!("wrote {}", path.display()))
        }
        _ => std::io::stdout().write_all(&encoded),
    };
    if let Err(e) = write_result {
        error!("error occurred while outputting image: {e}");
        return ExitCode::from(EXIT_OUTPUT_IO);
    }

    ExitCode::SUCCESS
}
