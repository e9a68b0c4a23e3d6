//! Texture assets for the planet renderer: container decode with format
//! auto-detection, resolution selection, and PNG encoding of finished
//! canvases.
//!
//! The kernel consumes already-decoded texels and emits a flat pixel
//! buffer; everything container-shaped lives here.

use std::path::Path;

use log::debug;
use terrella_core::{Canvas, EquirectTexture};

/// Canvas extent (in texture-space pixels, `size * zoom`) above which the
/// high-detail source texture is selected.
pub const DETAIL_THRESHOLD: f64 = 1024.0;

/// Errors from loading, decoding, or encoding image assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// Failed to read an asset file from disk.
    #[error("failed to read asset {path}: {source}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The byte stream was not a decodable PNG or JPEG.
    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded raster was unusable as an equirectangular texture.
    #[error("decoded texture is unusable: {0}")]
    Texture(#[from] terrella_core::RenderError),

    /// PNG encoding of the finished canvas failed.
    #[error("failed to encode canvas: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Which of the two bundled equirectangular textures to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureResolution {
    /// The 1x base map.
    Base,
    /// The 2x high-detail map, for large or zoomed-in renders.
    High,
}

impl TextureResolution {
    /// Pick a resolution for a render of `size` canvas pixels at `zoom`.
    pub fn for_render(size: u32, zoom: f64) -> Self {
        if f64::from(size) * zoom > DETAIL_THRESHOLD {
            Self::High
        } else {
            Self::Base
        }
    }

    /// File stem of the bundled texture at this resolution.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Base => "earth_1x",
            Self::High => "earth_2x",
        }
    }
}

/// Decode an equirectangular texture from PNG or JPEG bytes, auto-detecting
/// the container, and flatten it to RGB8.
pub fn decode_equirect(bytes: &[u8]) -> Result<EquirectTexture, AssetError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgb = decoded.into_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("decoded {width}x{height} equirectangular texture");
    Ok(EquirectTexture::from_rgb8(width, height, rgb.into_raw())?)
}

/// Load and decode the bundled texture at `resolution` from `dir`.
///
/// Tries the PNG file first, then falls back to a JPEG with the same stem;
/// the reported error names the PNG path.
pub fn load_equirect(dir: &Path, resolution: TextureResolution) -> Result<EquirectTexture, AssetError> {
    let stem = resolution.file_stem();
    let png_path = dir.join(format!("{stem}.png"));
    let bytes = match std::fs::read(&png_path) {
        Ok(bytes) => bytes,
        Err(png_err) => match std::fs::read(dir.join(format!("{stem}.jpg"))) {
            Ok(bytes) => bytes,
            Err(_) => {
                return Err(AssetError::Io {
                    path: png_path.display().to_string(),
                    source: png_err,
                });
            }
        },
    };
    decode_equirect(&bytes)
}

/// Encode a rendered canvas as a PNG byte stream.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, AssetError> {
    let mut out = Vec::new();
    {
        let mut encoder =
            png::Encoder::new(std::io::Cursor::new(&mut out), canvas.size(), canvas.size());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(canvas.pixels())?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrella_core::{RenderOptions, render};

    fn tiny_texture_png() -> Vec<u8> {
        // Render a small canvas and reuse its PNG as a decodable fixture.
        let texels: Vec<u8> = (0..8 * 4 * 3).map(|i| (i * 7 % 251) as u8).collect();
        let texture = EquirectTexture::from_rgb8(8, 4, texels).unwrap();
        let options = RenderOptions {
            size: 16,
            ..RenderOptions::default()
        };
        encode_png(&render(&options, &texture).unwrap()).unwrap()
    }

    #[test]
    fn test_resolution_threshold() {
        assert_eq!(TextureResolution::for_render(1024, 1.0), TextureResolution::Base);
        assert_eq!(TextureResolution::for_render(1024, 1.01), TextureResolution::High);
        assert_eq!(TextureResolution::for_render(2048, 1.0), TextureResolution::High);
        assert_eq!(TextureResolution::for_render(512, 0.5), TextureResolution::Base);
        assert_eq!(TextureResolution::for_render(512, 4.0), TextureResolution::High);
    }

    #[test]
    fn test_encode_produces_png_signature() {
        let bytes = tiny_texture_png();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_decode_recovers_dimensions() {
        let texture = decode_equirect(&tiny_texture_png()).unwrap();
        assert_eq!(texture.width(), 16);
        assert_eq!(texture.height(), 16);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_equirect(b"definitely not an image"),
            Err(AssetError::Decode(_))
        ));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_equirect(dir.path(), TextureResolution::Base).unwrap_err();
        match err {
            AssetError::Io { path, .. } => assert!(path.contains("earth_1x.png")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("earth_2x.png"), tiny_texture_png()).unwrap();
        let texture = load_equirect(dir.path(), TextureResolution::High).unwrap();
        assert_eq!(texture.width(), 16);
    }
}
