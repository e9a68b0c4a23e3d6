//! tiny_http server implementation.

use std::thread::{self, JoinHandle};

use serde::Serialize;
use terrella_assets::{TextureResolution, encode_png, load_equirect};
use terrella_config::Config;
use terrella_core::render;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{error, info, warn};

use crate::query::RenderRequest;

/// Errors raised while bringing the server up.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Could not bind the listen socket.
    #[error("failed to bind to {address}: {error}")]
    BindError {
        /// The address:port that was requested.
        address: String,
        /// Stringified bind failure.
        error: String,
    },
}

/// HTTP server that renders a planet image per request.
///
/// Runs its accept loop on a background thread; [`RenderServer::join`]
/// blocks the caller for binary use.
pub struct RenderServer {
    config: Config,
    actual_port: Option<u16>,
    handle: Option<JoinHandle<()>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

impl RenderServer {
    /// Create a server for the given configuration. Nothing is bound until
    /// [`RenderServer::start`].
    pub fn new(config: Config) -> Self {
        Self {
            config,
            actual_port: None,
            handle: None,
        }
    }

    /// Bind the configured address and start serving on a background thread.
    pub fn start(&mut self) -> Result<(), ServerError> {
        let address = format!(
            "{}:{}",
            self.config.server.bind_address, self.config.server.port
        );
        let server = Server::http(&address).map_err(|e| ServerError::BindError {
            address: address.clone(),
            error: e.to_string(),
        })?;

        let actual_port = server
            .server_addr()
            .to_ip()
            .map(|addr| addr.port())
            .unwrap_or(self.config.server.port);
        self.actual_port = Some(actual_port);
        info!("render server listening on {address} (port {actual_port})");

        let config = self.config.clone();
        let handle = thread::Builder::new()
            .name("render-server".into())
            .spawn(move || Self::run_server(server, &config))
            .expect("failed to spawn render server thread");

        self.handle = Some(handle);
        Ok(())
    }

    /// Block until the accept loop exits (it normally never does).
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Detach the accept loop.
    pub fn stop(&mut self) {
        // tiny_http doesn't support graceful shutdown; the thread terminates
        // when the server is dropped or the process ends.
        if let Some(handle) = self.handle.take() {
            std::mem::forget(handle);
        }
    }

    /// The port actually bound, which differs from the configured one when
    /// port 0 asked the OS to pick.
    pub fn actual_port(&self) -> u16 {
        self.actual_port.unwrap_or(self.config.server.port)
    }

    fn run_server(server: Server, config: &Config) {
        for request in server.incoming_requests() {
            if let Err(e) = Self::handle_request(request, config) {
                error!("render server error: {e}");
            }
        }
    }

    fn handle_request(
        request: Request,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let path = request.url().split('?').next().unwrap_or("/");
        match (request.method(), path) {
            (&Method::Get, "/") => Self::handle_generate(request, config),
            (&Method::Get, "/health") => {
                let body = serde_json::to_string(&HealthResponse {
                    status: "ok".to_string(),
                })?;
                request.respond(json_response(body, 200))?;
                Ok(())
            }
            _ => {
                request.respond(Response::from_string("Not Found").with_status_code(404))?;
                Ok(())
            }
        }
    }

    fn handle_generate(
        request: Request,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let params = RenderRequest::from_url(request.url(), config);

        if !params.errors.is_empty() {
            warn!("request {} had parameter errors: {:?}", request.url(), params.errors);
            if params.strict {
                let body = serde_json::to_string(&ErrorResponse {
                    error: params.errors.join("\n"),
                })?;
                request.respond(json_response(body, 400))?;
                return Ok(());
            }
        }

        let resolution = TextureResolution::for_render(params.size, params.zoom);
        let png = load_equirect(&config.assets.texture_dir, resolution)
            .map_err(|e| e.to_string())
            .and_then(|texture| {
                render(&params.options(config), &texture).map_err(|e| e.to_string())
            })
            .and_then(|canvas| encode_png(&canvas).map_err(|e| e.to_string()));

        match png {
            Ok(bytes) => {
                let header =
                    Header::from_bytes(&b"Content-Type"[..], &b"image/png"[..]).expect("static header");
                request.respond(Response::from_data(bytes).with_header(header))?;
            }
            Err(detail) => {
                error!("generation failed: {detail}");
                let body = serde_json::to_string(&ErrorResponse {
                    error: "An internal error occurred.".to_string(),
                })?;
                request.respond(json_response(body, 500))?;
            }
        }
        Ok(())
    }
}

impl Drop for RenderServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn json_response(body: String, status: u16) -> Response<std::io::Cursor<Vec<u8>>> {
    let header =
        Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).expect("static header");
    Response::from_string(body)
        .with_header(header)
        .with_status_code(status)
}
