//! HTTP rendering service.
//!
//! Serves planet images over HTTP: `GET /` renders from query parameters,
//! `GET /health` reports service status. Unparseable parameters fall back to
//! configured defaults unless strict mode rejects the request instead.

mod query;
mod server;


pub use query::RenderRequest;
pub use server::{RenderServer, ServerError};
