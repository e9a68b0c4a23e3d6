//! Query-parameter parsing with per-parameter defaulting.

use terrella_config::Config;
use terrella_core::{RenderOptions, Rgba};

/// Smallest canvas the server will render.
const MIN_SIZE: u32 = 16;
/// Largest canvas the server will render.
const MAX_SIZE: u32 = 2048;

/// A render request recovered from a URL query string.
///
/// Each parameter defaults independently: an absent parameter silently takes
/// the configured value, while a present-but-unparseable one takes the
/// default *and* records an error string. In strict mode the collected
/// errors reject the request; otherwise they are only reported in logs.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    /// Canvas size, clamped into the allowed range.
    pub size: u32,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Roll in degrees.
    pub roll: f64,
    /// Zoom factor.
    pub zoom: f64,
    /// Whether parameter errors reject the request.
    pub strict: bool,
    /// One message per parameter that failed to parse or was out of range.
    pub errors: Vec<String>,
}

impl RenderRequest {
    /// Parse the query portion of `url` against the configured defaults.
    pub fn from_url(url: &str, config: &Config) -> Self {
        let query = url.split_once('?').map_or("", |(_, q)| q);
        let mut request = Self {
            size: config.output.size,
            latitude: config.camera.latitude,
            longitude: config.camera.longitude,
            roll: config.camera.roll,
            zoom: config.camera.zoom,
            strict: config.server.strict,
            errors: Vec::new(),
        };

        for (key, value) in query_pairs(query) {
            match key {
                "size" => match value.parse::<u32>() {
                    Ok(size) => request.size = size,
                    Err(_) => request.fail("size"),
                },
                "latitude" => match value.parse::<f64>() {
                    Ok(lat) => request.latitude = lat,
                    Err(_) => request.fail("latitude"),
                },
                "longitude" => match value.parse::<f64>() {
                    Ok(lon) => request.longitude = lon,
                    Err(_) => request.fail("longitude"),
                },
                "roll" => match value.parse::<f64>() {
                    Ok(roll) => request.roll = roll,
                    Err(_) => request.fail("roll"),
                },
                "zoom" => match value.parse::<f64>() {
                    Ok(zoom) => request.zoom = zoom,
                    Err(_) => request.fail("zoom"),
                },
                "strict" => {
                    request.strict = matches!(value.to_ascii_lowercase().as_str(), "true" | "1");
                }
                _ => {}
            }
        }

        if request.size < MIN_SIZE || request.size > MAX_SIZE {
            request.size = request.size.clamp(MIN_SIZE, MAX_SIZE);
            request
                .errors
                .push(format!("param `size` is not within bounds [{MIN_SIZE}-{MAX_SIZE}]"));
        }

        request
    }

    /// Kernel options for this request, taking the non-query settings
    /// (background, halo) from the configuration.
    pub fn options(&self, config: &Config) -> RenderOptions {
        RenderOptions {
            size: self.size,
            background: Rgba::from(config.output.background),
            latitude: self.latitude,
            longitude: self.longitude,
            roll: self.roll,
            zoom: self.zoom,
            halo: config.camera.halo,
        }
    }

    fn fail(&mut self, param: &str) {
        self.errors.push(format!("param `{param}` could not be parsed"));
    }
}

/// Split a raw query string into key/value pairs. Values are taken verbatim;
/// the parameters this service accepts never need percent-decoding.
fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}
