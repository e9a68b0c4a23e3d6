//! Kernel error types.

/// Errors that can occur while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The source texture has zero width or height. A render either fully
    /// succeeds or is fully discarded, so this is the only kernel failure.
    #[error("source texture is empty")]
    EmptyTexture,

    /// The texel buffer length does not match the declared dimensions.
    #[error("texel buffer of {len} bytes does not match {width}x{height} RGB dimensions")]
    TextureSizeMismatch {
        /// Declared texture width in texels.
        width: u32,
        /// Declared texture height in texels.
        height: u32,
        /// Actual buffer length in bytes.
        len: usize,
    },
}
