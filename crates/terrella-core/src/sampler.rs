//! Spherical direction to equirectangular texel lookup.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec3;

use crate::texture::EquirectTexture;

/// Sample the texel under a rotated sphere-space direction.
///
/// `dir` must be a unit vector from the interior projection branch, already
/// rotated into texture-sampling space. Nearest-neighbor, no interpolation.
///
/// The recovered angle driving the vertical texel axis comes from `asin`
/// and the horizontal one from `atan2`; that axis assignment is what makes
/// the orientation controls behave as they do and must not be "fixed" to
/// match the variable names of either angle.
pub fn sample_equirect(texture: &EquirectTexture, dir: DVec3) -> [u8; 3] {
    debug_assert!(!texture.is_empty());

    let proj_lon = dir.y.asin();
    let proj_lat = (-dir.x).atan2(dir.z);

    let w = i64::from(texture.width());
    let h = i64::from(texture.height());

    // proj_lat + pi is non-negative, so the truncating cast is a floor.
    let wrapped = (((proj_lat + PI) * (texture.width() as f64 / TAU)) as i64 + w) % w;
    let sample_x = w - 1 - wrapped;

    let sample_y = h - 1 - ((proj_lon + FRAC_PI_2) * (texture.height() as f64 / PI)) as i64;
    // At the poles the scaled angle reaches h exactly, which would index one
    // row past the end; clamp both sides.
    let sample_y = sample_y.clamp(0, h - 1);

    texture.texel(sample_x as u32, sample_y as u32)
}
