//! Camera orientation as a 3x3 rotation matrix.

use glam::DMat3;

/// Build the view rotation for the given camera angles, in degrees.
///
/// The returned matrix `m` maps a camera-space direction into
/// texture-sampling space via `m * v`. It is the closed-form expansion of
/// `R_lat * R_lon * R_roll`: roll is applied first, then longitude spin,
/// then latitude tilt. Computed once per render.
pub fn view_rotation(latitude: f64, longitude: f64, roll: f64) -> DMat3 {
    let (lat_sin, lat_cos) = latitude.to_radians().sin_cos();
    let (lon_sin, lon_cos) = longitude.to_radians().sin_cos();
    let (roll_sin, roll_cos) = roll.to_radians().sin_cos();

    // glam matrices are column-major: each inner array below is one column.
    DMat3::from_cols_array_2d(&[
        [
            lat_cos * roll_cos - lat_sin * lon_sin * roll_sin,
            lon_cos * -roll_sin,
            lat_sin * roll_cos + lat_cos * lon_sin * roll_sin,
        ],
        [
            lat_sin * lon_sin * roll_cos + lat_cos * roll_sin,
            lon_cos * roll_cos,
            -lat_cos * lon_sin * roll_cos + lat_sin * roll_sin,
        ],
        [-(lat_sin * lon_cos), lon_sin, lat_cos * lon_cos],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn mats_approx_eq(a: DMat3, b: DMat3, eps: f64) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array())
            .all(|(x, y)| (x - y).abs() < eps)
    }

    #[test]
    fn test_zero_angles_is_identity() {
        assert!(mats_approx_eq(
            view_rotation(0.0, 0.0, 0.0),
            DMat3::IDENTITY,
            1e-12
        ));
    }

    #[test]
    fn test_full_turn_matches_zero() {
        assert!(mats_approx_eq(
            view_rotation(0.0, 360.0, 0.0),
            view_rotation(0.0, 0.0, 0.0),
            1e-12
        ));
        assert!(mats_approx_eq(
            view_rotation(360.0, -360.0, 720.0),
            view_rotation(0.0, 0.0, 0.0),
            1e-11
        ));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let m = view_rotation(37.0, -118.5, 12.25);
        let v = m * DVec3::new(0.6, -0.48, 0.64).normalize();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((m.determinant() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quarter_turns_match_hand_expansion() {
        // lon = 90: rows collapse to (1,0,0), (0,0,1), (0,-1,0).
        let m = view_rotation(0.0, 90.0, 0.0);
        assert!(m.mul_vec3(DVec3::Z).abs_diff_eq(DVec3::Y, 1e-12));
        assert!(m.mul_vec3(DVec3::X).abs_diff_eq(DVec3::X, 1e-12));

        // lat = 90: the view axis lands on -x, which the sampler reads as a
        // horizontal texture shift.
        let m = view_rotation(90.0, 0.0, 0.0);
        assert!(m.mul_vec3(DVec3::Z).abs_diff_eq(DVec3::NEG_X, 1e-12));
    }
}
