//! Kitti-style lidar to camera calibration.

use glam::{DMat4, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::error::{CuboidError, CuboidResult};
use crate::geometry::box_vertices;
use crate::types::CuboidBox;

/// Per-camera calibration as loaded from frame data.
///
/// `p` is the 3x4 camera intrinsic, `r` the 3x3 rectifying rotation and `t`
/// the 3x4 lidar to camera transform. The matrices are kept as nested rows so
/// that malformed input can be reported instead of silently producing NaNs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    /// Camera intrinsic matrix, 3x4.
    #[serde(rename = "P")]
    pub p: Vec<Vec<f64>>,
    /// Lidar to camera rotation, 3x3.
    #[serde(rename = "R")]
    pub r: Vec<Vec<f64>>,
    /// Lidar to camera transform, 3x4.
    #[serde(rename = "T")]
    pub t: Vec<Vec<f64>>,
    /// Height of the ground plane in lidar coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_height: Option<f64>,
    /// Name of the camera this calibration belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cal_name: Option<String>,
}

impl Calibration {
    /// Compose the lidar to image transform, see [`compose_calibration`].
    pub fn composed(&self) -> CuboidResult<DMat4> {
        let composed = compose_calibration(&self.p, &self.r, &self.t);
        match &composed {
            Ok(_) => log::debug!(
                "composed calibration for camera {}",
                self.cal_name.as_deref().unwrap_or("<unnamed>")
            ),
            Err(err) => log::warn!(
                "skipping camera {}: {}",
                self.cal_name.as_deref().unwrap_or("<unnamed>"),
                err
            ),
        }
        composed
    }
}

/// Embed a row-major `rows x cols` matrix into the top-left of a 4x4 identity.
///
/// The bottom row stays `[0, 0, 0, 1]`.
fn embed(name: &'static str, m: &[Vec<f64>], rows: usize, cols: usize) -> CuboidResult<DMat4> {
    let shape_error = |found_cols: usize| CuboidError::InvalidCalibration {
        name,
        expected_rows: rows,
        expected_cols: cols,
        rows: m.len(),
        cols: found_cols,
    };

    if m.len() != rows {
        return Err(shape_error(m.first().map_or(0, Vec::len)));
    }
    if let Some(row) = m.iter().find(|row| row.len() != cols) {
        return Err(shape_error(row.len()));
    }
    if m.iter().flatten().any(|v| !v.is_finite()) {
        return Err(CuboidError::NonFiniteCalibration { name });
    }

    let mut out = [[0.0; 4]; 4];
    for (i, row) in out.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    for (i, row) in m.iter().enumerate() {
        out[i][..cols].copy_from_slice(row);
    }

    // glam is column-major
    Ok(DMat4::from_cols_array_2d(&out).transpose())
}

/// Compose Kitti calibration matrices into a single lidar to image transform.
///
/// Each matrix is embedded into a 4x4 homogeneous matrix and the result is
/// `P * R * T`, so a lidar point is transformed by `T`, then `R`, then `P`.
///
/// # Arguments
///
/// * `p` - Camera intrinsic, 3x4.
/// * `r` - Rectifying rotation, 3x3.
/// * `t` - Lidar to camera transform, 3x4.
///
/// # Errors
///
/// [`CuboidError::InvalidCalibration`] when a matrix has the wrong shape and
/// [`CuboidError::NonFiniteCalibration`] when it contains NaN or infinity.
///
/// Example:
///
/// ```
/// use cuboid_3d::calibration::compose_calibration;
///
/// let p = vec![vec![1.0, 0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0, 0.0]];
/// let r = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
/// let composed = compose_calibration(&p, &r, &p).unwrap();
/// assert_eq!(composed, glam::DMat4::IDENTITY);
/// ```
pub fn compose_calibration(p: &[Vec<f64>], r: &[Vec<f64>], t: &[Vec<f64>]) -> CuboidResult<DMat4> {
    let p = embed("P", p, 3, 4)?;
    let r = embed("R", r, 3, 3)?;
    let t = embed("T", t, 3, 4)?;
    Ok(p * r * t)
}

/// Project a lidar point into the normalized image plane.
///
/// Returns `None` when the transformed depth is negative, i.e. the point is
/// behind the camera. Otherwise the transformed point is divided by its depth
/// and returned; `z` of the result is 1.
pub fn project_lidar_to_image(point: DVec3, composed: &DMat4) -> Option<DVec3> {
    let v = *composed * DVec4::new(point.x, point.y, point.z, 1.0);
    if v.z < 0.0 {
        return None;
    }
    let inv_z = 1.0 / v.z;
    Some(DVec3::new(v.x * inv_z, v.y * inv_z, v.z * inv_z))
}

/// Project the eight vertices of a box into the image.
///
/// Vertices follow [`box_vertices`] order. Returns `None` if any vertex is
/// behind the camera, in which case the overlay for this camera is omitted.
pub fn project_box_to_image(cuboid: &CuboidBox, composed: &DMat4) -> Option<[DVec2; 8]> {
    let mut out = [DVec2::ZERO; 8];
    for (dst, vertex) in out.iter_mut().zip(box_vertices(cuboid)) {
        *dst = project_lidar_to_image(vertex, composed)?.truncate();
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn identity34() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
        ]
    }

    fn identity33() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ]
    }

    #[test]
    fn test_compose_order() -> Result<(), Box<dyn std::error::Error>> {
        // T shifts by +1 in x, R swaps x and y, P scales x by 2
        let t = vec![
            vec![1.0, 0.0, 0.0, 1.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
        ];
        let r = vec![
            vec![0.0, 1.0, 0.0],
            vec![1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let p = vec![
            vec![2.0, 0.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
        ];
        let composed = compose_calibration(&p, &r, &t)?;
        let v = composed.transform_point3(DVec3::new(1.0, 5.0, 1.0));
        // T: (2, 5, 1) -> R: (5, 2, 1) -> P: (10, 2, 1)
        assert_relative_eq!(v.x, 10.0);
        assert_relative_eq!(v.y, 2.0);
        assert_relative_eq!(v.z, 1.0);
        Ok(())
    }

    #[test]
    fn test_project_lidar_to_image() -> Result<(), Box<dyn std::error::Error>> {
        let p = vec![
            vec![500.0, 0.0, 320.0, 0.0],
            vec![0.0, 500.0, 240.0, 0.0],
            vec![0.0, 0.0, 1.0, 0.0],
        ];
        let composed = compose_calibration(&p, &identity33(), &identity34())?;

        let center = project_lidar_to_image(DVec3::new(0.0, 0.0, 5.0), &composed)
            .ok_or("expected a projection")?;
        assert_relative_eq!(center.x, 320.0);
        assert_relative_eq!(center.y, 240.0);
        assert_relative_eq!(center.z, 1.0);

        let off = project_lidar_to_image(DVec3::new(1.0, 2.0, 10.0), &composed)
            .ok_or("expected a projection")?;
        assert_relative_eq!(off.x, 500.0 * 0.1 + 320.0);
        assert_relative_eq!(off.y, 500.0 * 0.2 + 240.0);

        assert!(project_lidar_to_image(DVec3::new(0.0, 0.0, -5.0), &composed).is_none());
        Ok(())
    }

    #[test]
    fn test_invalid_shapes() {
        let short = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]];
        assert_eq!(
            compose_calibration(&short, &identity33(), &identity34()),
            Err(CuboidError::InvalidCalibration {
                name: "P",
                expected_rows: 3,
                expected_cols: 4,
                rows: 2,
                cols: 3,
            })
        );

        let mut ragged = identity33();
        ragged[1].push(0.0);
        assert_eq!(
            compose_calibration(&identity34(), &ragged, &identity34()),
            Err(CuboidError::InvalidCalibration {
                name: "R",
                expected_rows: 3,
                expected_cols: 3,
                rows: 3,
                cols: 4,
            })
        );

        assert!(matches!(
            compose_calibration(&identity34(), &identity33(), &[]),
            Err(CuboidError::InvalidCalibration { name: "T", rows: 0, cols: 0, .. })
        ));
    }

    #[test]
    fn test_non_finite() {
        let mut t = identity34();
        t[2][3] = f64::NAN;
        assert_eq!(
            compose_calibration(&identity34(), &identity33(), &t),
            Err(CuboidError::NonFiniteCalibration { name: "T" })
        );
    }

    #[test]
    fn test_calibration_from_json() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{
            "P": [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0]],
            "R": [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
            "T": [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 2]],
            "calName": "front"
        }"#;
        let calib: Calibration = serde_json::from_str(json)?;
        assert_eq!(calib.cal_name.as_deref(), Some("front"));
        assert_eq!(calib.ground_height, None);
        let composed = calib.composed()?;
        let v = project_lidar_to_image(DVec3::new(2.0, 4.0, 0.0), &composed)
            .ok_or("expected a projection")?;
        assert_relative_eq!(v.x, 1.0);
        assert_relative_eq!(v.y, 2.0);
        Ok(())
    }

    #[test]
    fn test_project_box_to_image() -> Result<(), Box<dyn std::error::Error>> {
        let composed = compose_calibration(&identity34(), &identity33(), &identity34())?;

        let ahead = CuboidBox::new(DVec3::new(0.0, 0.0, 10.0), 2.0, 2.0, 2.0, 0.0);
        let projected = project_box_to_image(&ahead, &composed).ok_or("expected a projection")?;
        // bottom ring at z = 9, top ring at z = 11
        assert_relative_eq!(projected[0].x, 1.0 / 9.0);
        assert_relative_eq!(projected[0].y, 1.0 / 9.0);
        assert_relative_eq!(projected[4].x, 1.0 / 11.0);

        let straddling = CuboidBox::new(DVec3::ZERO, 2.0, 2.0, 2.0, 0.0);
        assert!(project_box_to_image(&straddling, &composed).is_none());
        Ok(())
    }
}
