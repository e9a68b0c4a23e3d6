//! Inverse orthographic projection from canvas pixels onto the unit sphere.

use glam::DVec3;

/// A canvas pixel mapped into camera space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscPoint {
    /// Camera-space direction. On the sphere interior this is a point on the
    /// near hemisphere of the unit sphere. Outside the silhouette it is a
    /// deliberately flattened vector (z = 0, x/y normalized onto the unit
    /// circle) that only parametrizes the halo falloff and must not drive
    /// texture sampling.
    pub dir: DVec3,
    /// Distance from the disc center in silhouette-radius units. 1.0 is
    /// exactly the silhouette edge.
    pub circle_mag: f64,
    /// Whether the pixel lies inside the silhouette and `dir` is a genuine
    /// sphere surface point.
    pub on_sphere: bool,
}

/// Project pixel `(px, py)` of a `size` x `size` canvas onto the unit
/// sphere, for a silhouette of `circle_radius` disc units.
///
/// Image rows grow downward while the camera's v axis grows upward, so the
/// vertical coordinate is flipped.
pub fn project_disc(px: u32, py: u32, size: u32, circle_radius: f64) -> DiscPoint {
    let half = f64::from(size) / 2.0;
    let u = (f64::from(px) - half) / half;
    let v = -(f64::from(py) - half) / half;

    let circle_mag = (u * u + v * v).sqrt() / circle_radius;
    let mut x = u / circle_radius;
    let mut y = v / circle_radius;

    if circle_mag < 1.0 {
        let z = (1.0 - circle_mag * circle_mag).sqrt();
        DiscPoint {
            dir: DVec3::new(x, y, z),
            circle_mag,
            on_sphere: true,
        }
    } else {
        x /= circle_mag;
        y /= circle_mag;
        DiscPoint {
            dir: DVec3::new(x, y, 0.0),
            circle_mag,
            on_sphere: false,
        }
    }
}
