//! Decoded equirectangular source texture.

use crate::error::RenderError;

/// An already-decoded equirectangular texture: row-major RGB8 texels where
/// the x axis spans longitude [-180, 180) degrees and the y axis spans
/// latitude [+90, -90] degrees.
///
/// The kernel only reads the texture for the duration of a render; ownership
/// stays with the caller.
#[derive(Debug, Clone)]
pub struct EquirectTexture {
    width: u32,
    height: u32,
    texels: Vec<u8>,
}

impl EquirectTexture {
    /// Wrap a row-major RGB8 buffer. The buffer length must be exactly
    /// `width * height * 3`; zero dimensions are accepted here and rejected
    /// at render time.
    pub fn from_rgb8(width: u32, height: u32, texels: Vec<u8>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 3;
        if texels.len() != expected {
            return Err(RenderError::TextureSizeMismatch {
                width,
                height,
                len: texels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Texture width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Texture height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the texture has no usable texels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Fetch the RGB texel at `(x, y)`. Callers must stay in bounds.
    pub fn texel(&self, x: u32, y: u32) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height);
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        [
            self.texels[offset],
            self.texels[offset + 1],
            self.texels[offset + 2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_buffer() {
        let result = EquirectTexture::from_rgb8(2, 2, vec![0; 11]);
        assert!(matches!(
            result,
            Err(RenderError::TextureSizeMismatch { len: 11, .. })
        ));
    }

    #[test]
    fn test_empty_texture_is_constructible_but_flagged() {
        let texture = EquirectTexture::from_rgb8(0, 0, Vec::new()).unwrap();
        assert!(texture.is_empty());
    }

    #[test]
    fn test_texel_fetch_is_row_major() {
        let texels = vec![
            1, 2, 3, 4, 5, 6, //
            7, 8, 9, 10, 11, 12,
        ];
        let texture = EquirectTexture::from_rgb8(2, 2, texels).unwrap();
        assert_eq!(texture.texel(0, 0), [1, 2, 3]);
        assert_eq!(texture.texel(1, 0), [4, 5, 6]);
        assert_eq!(texture.texel(0, 1), [7, 8, 9]);
        assert_eq!(texture.texel(1, 1), [10, 11, 12]);
    }
}
