//! Orthographic planet rendering kernel.
//!
//! A pure, side-effect-free renderer: given [`RenderOptions`] and a decoded
//! [`EquirectTexture`], [`render`] produces a square RGBA [`Canvas`] of the
//! sphere's near hemisphere with antialiased silhouette edges, optional
//! rim-light halo, and straight-alpha compositing over a background color.
//! Container decode/encode, configuration, and entry points live in sibling
//! crates; this crate owns only the per-pixel math.

mod canvas;
mod compositing;
mod error;
mod options;
mod projection;
mod render;
mod rotation;
mod sampler;
mod shading;
mod texture;

pub use canvas::Canvas;
pub use compositing::{Rgba, over};
pub use error::RenderError;
pub use options::RenderOptions;
pub use projection::{DiscPoint, project_disc};
pub use render::render;
pub use rotation::view_rotation;
pub use sampler::sample_equirect;
pub use shading::{circle_mask, edge_band, halo_shade};
pub use texture::EquirectTexture;
