use std::f64::consts::TAU;

use glam::{DMat4, DVec2, DVec3};

/// Wrap a rotation angle into `[0, 2π)`.
///
/// NaN and infinite angles return NaN.
///
/// Example:
///
/// ```
/// use cuboid_3d::transforms::normalize_rotation;
///
/// let angle = normalize_rotation(-std::f64::consts::FRAC_PI_2);
/// assert!((angle - 3.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-12);
/// ```
pub fn normalize_rotation(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly 2π
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Homogeneous rotation about the z axis.
#[inline]
pub fn rotation_z(angle: f64) -> DMat4 {
    DMat4::from_rotation_z(angle)
}

/// Homogeneous translation by `offset`.
#[inline]
pub fn translation(offset: DVec3) -> DMat4 {
    DMat4::from_translation(offset)
}

/// Rotation about a z-parallel axis through `center`.
///
/// Composed as `TBack(center) * Rz(angle) * TFrom(-center)`: a point is first
/// moved to the origin, rotated, then moved back.
///
/// # Arguments
///
/// * `center` - A point on the rotation axis.
/// * `angle` - The rotation angle in radians.
///
/// # Returns
///
/// The 4x4 homogeneous transform.
pub fn rotation_z_about(center: DVec3, angle: f64) -> DMat4 {
    translation(center) * rotation_z(angle) * translation(-center)
}

/// Rotate a 2D point about `center` by `angle` radians counter-clockwise.
///
/// Example:
///
/// ```
/// use cuboid_3d::transforms::rotate_point_about;
/// use glam::DVec2;
///
/// let p = rotate_point_about(DVec2::new(2.0, 1.0), DVec2::ZERO, std::f64::consts::FRAC_PI_2);
/// assert!((p - DVec2::new(-1.0, 2.0)).length() < 1e-12);
/// ```
pub fn rotate_point_about(point: DVec2, center: DVec2, angle: f64) -> DVec2 {
    let (s, c) = angle.sin_cos();
    let d = point - center;
    DVec2::new(d.x * c - d.y * s, d.x * s + d.y * c) + center
}

/// Rotate a vector about the z axis by `angle` radians.
#[inline]
pub fn rotate_vector_z(v: DVec3, angle: f64) -> DVec3 {
    rotation_z(angle).transform_vector3(v)
}
