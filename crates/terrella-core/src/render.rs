//! Render orchestration: the per-pixel pipeline and its row-partitioned
//! parallel driver.

use glam::DMat3;
use log::debug;

use crate::canvas::{Canvas, write_pixel};
use crate::compositing::{Rgba, over};
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::projection::project_disc;
use crate::sampler::sample_equirect;
use crate::shading::{circle_mask, halo_shade};
use crate::texture::EquirectTexture;

/// Render the sphere described by `options`, sampling `texture`.
///
/// Pure and synchronous: a render either completes with a full
/// `size` x `size` canvas or fails; there is no partial output. Rows are
/// split into contiguous bands, each owned by one worker thread. Every
/// pixel depends only on its own coordinates, the rotation matrix, and the
/// read-only texture, so the bands need no coordination beyond the join.
pub fn render(options: &RenderOptions, texture: &EquirectTexture) -> Result<Canvas, RenderError> {
    if texture.is_empty() {
        return Err(RenderError::EmptyTexture);
    }

    let size = options.size;
    let matrix = crate::rotation::view_rotation(options.latitude, options.longitude, options.roll);
    let circle_radius = options.circle_radius();

    let mut canvas = Canvas::new(size);
    if size == 0 {
        return Ok(canvas);
    }
    let stride = canvas.row_stride();
    let workers = worker_count().min(size.max(1) as usize);
    let rows_per_band = (size as usize).div_ceil(workers);

    std::thread::scope(|scope| {
        for (band_index, band) in canvas
            .pixels_mut()
            .chunks_mut(rows_per_band * stride)
            .enumerate()
        {
            let row0 = (band_index * rows_per_band) as u32;
            std::thread::Builder::new()
                .name("render-worker".into())
                .spawn_scoped(scope, move || {
                    render_rows(options, texture, matrix, circle_radius, row0, stride, band);
                })
                .expect("failed to spawn render worker thread");
        }
    });

    debug!(
        "rendered {size}x{size} canvas across {workers} workers (radius {circle_radius})"
    );
    Ok(canvas)
}

/// Worker threads for the pixel loop: one per core, leaving a core of
/// headroom for the caller.
fn worker_count() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// Fill a contiguous band of canvas rows starting at row `row0`.
fn render_rows(
    options: &RenderOptions,
    texture: &EquirectTexture,
    matrix: DMat3,
    circle_radius: f64,
    row0: u32,
    stride: usize,
    band: &mut [u8],
) {
    for (dy, row) in band.chunks_exact_mut(stride).enumerate() {
        let py = row0 + dy as u32;
        for px in 0..options.size {
            write_pixel(row, px, shade_pixel(options, texture, matrix, circle_radius, px, py));
        }
    }
}

/// The full per-pixel pipeline: project, rotate, sample, shade, composite.
fn shade_pixel(
    options: &RenderOptions,
    texture: &EquirectTexture,
    matrix: DMat3,
    circle_radius: f64,
    px: u32,
    py: u32,
) -> Rgba {
    let point = project_disc(px, py, options.size, circle_radius);

    // Exterior pixels carry zero coverage, so their base color never shows;
    // only interior directions are valid sampling inputs.
    let mut base = if point.on_sphere {
        sample_equirect(texture, matrix * point.dir)
    } else {
        [0, 0, 0]
    };

    if options.halo {
        base = halo_shade(base, point.dir.z);
    }

    let mask = circle_mask(point.circle_mag, options.size);
    let foreground = Rgba::new(base[0], base[1], base[2], (mask * 255.0) as u8);
    over(foreground, options.background)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A smooth horizontal gradient texture: neighboring texels differ by at
    /// most a few counts per channel, so a one-texel shift cannot produce a
    /// large byte difference.
    fn gradient_texture(width: u32, height: u32) -> EquirectTexture {
        let mut texels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width.max(1)) as u8;
                let g = (y * 255 / height.max(1)) as u8;
                texels.extend_from_slice(&[r, g, 128]);
            }
        }
        EquirectTexture::from_rgb8(width, height, texels).unwrap()
    }

    fn silhouette_pixels(canvas: &Canvas) -> usize {
        canvas
            .pixels()
            .chunks_exact(4)
            .filter(|px| px[3] > 0)
            .count()
    }

    #[test]
    fn test_empty_texture_yields_no_output() {
        let texture = EquirectTexture::from_rgb8(0, 0, Vec::new()).unwrap();
        let options = RenderOptions {
            size: 1024,
            ..RenderOptions::default()
        };
        assert!(matches!(
            render(&options, &texture),
            Err(RenderError::EmptyTexture)
        ));
    }

    #[test]
    fn test_output_is_exactly_size_squared_rgba() {
        let texture = gradient_texture(64, 32);
        let options = RenderOptions {
            size: 128,
            ..RenderOptions::default()
        };
        let canvas = render(&options, &texture).unwrap();
        assert_eq!(canvas.pixels().len(), 128 * 128 * 4);
    }

    #[test]
    fn test_edge_alpha_is_monotone_from_center() {
        let options = RenderOptions {
            size: 128,
            halo: false,
            ..RenderOptions::default()
        };
        let canvas = render(&options, &gradient_texture(64, 32)).unwrap();

        // Walk outward from the center along the diagonal (which crosses the
        // silhouette before the canvas ends); coverage never increases with
        // distance.
        let mid = options.size / 2;
        let mut last = u8::MAX;
        for step in 0..(options.size - mid) {
            let alpha = canvas.pixel(mid + step, mid + step).a;
            assert!(alpha <= last, "alpha rose at step {step}: {alpha} > {last}");
            last = alpha;
        }
        // And the ramp actually reaches both extremes.
        assert_eq!(canvas.pixel(mid, mid).a, 255);
        assert_eq!(
            canvas.pixel(options.size - 1, options.size - 1).a,
            0
        );
    }

    #[test]
    fn test_zoom_grows_and_shrinks_the_silhouette() {
        let texture = gradient_texture(64, 32);
        let base = RenderOptions {
            size: 96,
            halo: false,
            ..RenderOptions::default()
        };
        let mut zoomed_in = base;
        zoomed_in.zoom = 2.0;
        let mut zoomed_out = base;
        zoomed_out.zoom = 0.5;

        let reference = silhouette_pixels(&render(&base, &texture).unwrap());
        let larger = silhouette_pixels(&render(&zoomed_in, &texture).unwrap());
        let smaller = silhouette_pixels(&render(&zoomed_out, &texture).unwrap());
        assert!(larger > reference);
        assert!(smaller < reference);
    }

    #[test]
    fn test_exterior_matches_background_without_halo() {
        let background = Rgba::new(7, 77, 177, 255);
        let options = RenderOptions {
            size: 64,
            background,
            halo: false,
            ..RenderOptions::default()
        };
        let canvas = render(&options, &gradient_texture(32, 16)).unwrap();
        // Canvas corners are well outside the silhouette.
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(canvas.pixel(x, y), background);
        }
    }

    #[test]
    fn test_full_longitude_turn_matches_zero() {
        let texture = gradient_texture(64, 32);
        let zero = RenderOptions {
            size: 64,
            ..RenderOptions::default()
        };
        let mut turned = zero;
        turned.longitude = 360.0;

        let a = render(&zero, &texture).unwrap();
        let b = render(&turned, &texture).unwrap();
        // The rotation matrices differ only by floating-point residue, so at
        // worst a sample lands one texel over on the smooth gradient.
        for (&x, &y) in a.pixels().iter().zip(b.pixels()) {
            assert!(i16::from(x).abs_diff(i16::from(y)) <= 8);
        }
    }

    #[test]
    fn test_transparent_background_outside_is_fully_transparent() {
        let options = RenderOptions {
            size: 64,
            halo: false,
            ..RenderOptions::default()
        };
        let canvas = render(&options, &gradient_texture(32, 16)).unwrap();
        assert_eq!(canvas.pixel(0, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_halo_tints_the_rim() {
        let mut options = RenderOptions {
            size: 128,
            ..RenderOptions::default()
        };
        options.halo = true;
        let canvas = render(&options, &gradient_texture(64, 32)).unwrap();
        // Just inside the silhouette on the middle row the halo shows its
        // blue bias.
        let mid = options.size / 2;
        let rim = canvas.pixel(options.size - 3, mid);
        assert!(rim.b > rim.r);
    }
}
