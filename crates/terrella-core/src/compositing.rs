//! Straight-alpha "over" compositing.
//!
//! Channel values are not premultiplied by alpha prior to blending, matching
//! the output format (non-premultiplied RGBA bytes).

/// A straight-alpha RGBA color, one byte per channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Construct a color from channel bytes.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color from RGB bytes.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Composite `fg` over `bg`.
///
/// When both layers are fully transparent the result is defined as
/// transparent black rather than the 0/0 division the blend equation would
/// otherwise produce.
pub fn over(fg: Rgba, bg: Rgba) -> Rgba {
    let bg_a = f64::from(bg.a) / 255.0;
    let bg_r = f64::from(bg.r) * bg_a;
    let bg_g = f64::from(bg.g) * bg_a;
    let bg_b = f64::from(bg.b) * bg_a;

    let fg_a = f64::from(fg.a) / 255.0;

    let out_a = bg_a + fg_a - bg_a * fg_a;
    if out_a == 0.0 {
        return Rgba::TRANSPARENT;
    }

    let out_r = (f64::from(fg.r) * fg_a + bg_r * (1.0 - fg_a)) / out_a;
    let out_g = (f64::from(fg.g) * fg_a + bg_g * (1.0 - fg_a)) / out_a;
    let out_b = (f64::from(fg.b) * fg_a + bg_b * (1.0 - fg_a)) / out_a;

    Rgba::new(out_r as u8, out_g as u8, out_b as u8, (out_a * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_foreground_wins() {
        let fg = Rgba::opaque(10, 20, 30);
        let bg = Rgba::opaque(200, 200, 200);
        assert_eq!(over(fg, bg), fg);
    }

    #[test]
    fn test_transparent_foreground_keeps_background() {
        let bg = Rgba::opaque(12, 34, 56);
        assert_eq!(over(Rgba::TRANSPARENT, bg), bg);
    }

    #[test]
    fn test_both_transparent_is_defined() {
        let out = over(Rgba::TRANSPARENT, Rgba::new(90, 90, 90, 0));
        assert_eq!(out, Rgba::TRANSPARENT);
    }

    #[test]
    fn test_half_alpha_blend() {
        // fg_a = 0.5, opaque background: out = fg * 0.5 + bg * 0.5.
        let fg = Rgba::new(255, 0, 0, 128);
        let bg = Rgba::opaque(0, 0, 255);
        let out = over(fg, bg);
        assert_eq!(out.a, 255);
        assert!((f64::from(out.r) - 128.0).abs() <= 1.0);
        assert_eq!(out.g, 0);
        assert!((f64::from(out.b) - 127.0).abs() <= 1.0);
    }

    #[test]
    fn test_transparent_over_translucent_keeps_color() {
        let bg = Rgba::new(100, 150, 200, 64);
        let out = over(Rgba::TRANSPARENT, bg);
        assert_eq!(out.a, bg.a);
        // Premultiply and un-premultiply round-trips the channels.
        assert!((i32::from(out.r) - i32::from(bg.r)).abs() <= 1);
        assert!((i32::from(out.g) - i32::from(bg.g)).abs() <= 1);
        assert!((i32::from(out.b) - i32::from(bg.b)).abs() <= 1);
    }
}
