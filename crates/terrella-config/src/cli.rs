//! Command-line argument parsing for the terrella binaries.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terrella command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "terrella", about = "Orthographic planet renderer")]
pub struct CliArgs {
    /// Output canvas size in pixels.
    #[arg(long)]
    pub size: Option<u32>,

    /// Latitude to display, degrees.
    #[arg(long)]
    pub latitude: Option<f64>,

    /// Longitude to display, degrees.
    #[arg(long)]
    pub longitude: Option<f64>,

    /// Rotation of the display camera, degrees.
    #[arg(long)]
    pub roll: Option<f64>,

    /// Zoom factor of the camera.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Disable the rim-light halo.
    #[arg(long)]
    pub no_halo: bool,

    /// Background color as RRGGBBAA hex.
    #[arg(long)]
    pub background: Option<String>,

    /// Directory holding the equirectangular textures.
    #[arg(long)]
    pub texture_dir: Option<PathBuf>,

    /// Location to write the image to, `-` for stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Server bind port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Reject unparseable request parameters instead of defaulting them.
    #[arg(long)]
    pub strict: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse an `RRGGBBAA` hex string into RGBA bytes.
pub fn parse_background(s: &str) -> Option<[u8; 4]> {
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 8 || !s.is_ascii() {
        return None;
    }
    let mut channels = [0u8; 4];
    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(channels)
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.size {
            self.output.size = size;
        }
        if let Some(lat) = args.latitude {
            self.camera.latitude = lat;
        }
        if let Some(lon) = args.longitude {
            self.camera.longitude = lon;
        }
        if let Some(roll) = args.roll {
            self.camera.roll = roll;
        }
        if let Some(zoom) = args.zoom {
            self.camera.zoom = zoom;
        }
        if args.no_halo {
            self.camera.halo = false;
        }
        if let Some(ref background) = args.background {
            match parse_background(background) {
                Some(channels) => self.output.background = channels,
                None => log::warn!("ignoring invalid background color {background:?}"),
            }
        }
        if let Some(ref dir) = args.texture_dir {
            self.assets.texture_dir = dir.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
        if let Some(strict) = args.strict {
            self.server.strict = strict;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
