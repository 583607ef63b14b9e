//! Cuboid footprint and face corner derivation.
//!
//! Corner order is fixed for every face: corners 0 and 2 are always opposite
//! each other, and the inverse-editing code in [`crate::projection`] relies on
//! that indexing.

use glam::{DVec2, DVec3};

use crate::transforms::{normalize_rotation, rotate_point_about, rotation_z_about};
use crate::types::{CuboidBox, FaceKind};

/// Tolerance in world units for a point to count as lying on a polygon edge.
const ON_EDGE_EPS: f64 = 1e-9;

/// Clamp a size to be non-negative, keeping NaN.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else {
        v
    }
}

/// Half of `(width, height, depth)`, negative sizes collapsed to zero.
fn half_extents(cuboid: &CuboidBox) -> (f64, f64, f64) {
    (
        non_negative(cuboid.width) / 2.0,
        non_negative(cuboid.height) / 2.0,
        non_negative(cuboid.depth) / 2.0,
    )
}

/// The rotated ground footprint of a box and its vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    /// The four footprint corners in the xy plane.
    pub polygon: [DVec2; 4],
    /// Bottom of the box.
    pub z_min: f64,
    /// Top of the box.
    pub z_max: f64,
}

impl Footprint {
    /// Whether a point lies inside the footprint and within `[z_min, z_max]`.
    ///
    /// Points on the boundary count as inside.
    #[inline]
    pub fn contains(&self, point: DVec3) -> bool {
        point.z >= self.z_min
            && point.z <= self.z_max
            && point_in_polygon(point.truncate(), &self.polygon)
    }
}

/// Compute the rotated footprint polygon and z range of a box.
///
/// The unrotated corners are, in order, `(+w/2, +h/2)`, `(+w/2, -h/2)`,
/// `(-w/2, -h/2)`, `(-w/2, +h/2)` relative to the center. Each corner is then
/// rotated about the center by the normalized box rotation. Negative sizes
/// count as zero, so such a box has a zero-area footprint.
///
/// Example:
///
/// ```
/// use cuboid_3d::geometry::footprint_and_z_range;
/// use cuboid_3d::types::CuboidBox;
/// use glam::{DVec2, DVec3};
///
/// let cuboid = CuboidBox::new(DVec3::ZERO, 4.0, 2.0, 2.0, 0.0);
/// let footprint = footprint_and_z_range(&cuboid);
/// assert_eq!(footprint.polygon[0], DVec2::new(2.0, 1.0));
/// assert_eq!(footprint.z_min, -1.0);
/// ```
pub fn footprint_and_z_range(cuboid: &CuboidBox) -> Footprint {
    let c = cuboid.center;
    let (hw, hh, hd) = half_extents(cuboid);
    let rotation = normalize_rotation(cuboid.rotation);
    let center = c.truncate();

    let polygon = [
        DVec2::new(c.x + hw, c.y + hh),
        DVec2::new(c.x + hw, c.y - hh),
        DVec2::new(c.x - hw, c.y - hh),
        DVec2::new(c.x - hw, c.y + hh),
    ]
    .map(|p| rotate_point_about(p, center, rotation));

    Footprint {
        polygon,
        z_min: c.z - hd,
        z_max: c.z + hd,
    }
}

/// Corners of the side face (local x-z plane through the center), unrotated.
pub fn side_face_points(cuboid: &CuboidBox) -> [DVec3; 4] {
    let c = cuboid.center;
    let (hw, _, hd) = half_extents(cuboid);
    [
        DVec3::new(c.x + hw, c.y, c.z + hd),
        DVec3::new(c.x - hw, c.y, c.z + hd),
        DVec3::new(c.x - hw, c.y, c.z - hd),
        DVec3::new(c.x + hw, c.y, c.z - hd),
    ]
}

/// Corners of the back face (local y-z plane through the center), unrotated.
pub fn back_face_points(cuboid: &CuboidBox) -> [DVec3; 4] {
    let c = cuboid.center;
    let (_, hh, hd) = half_extents(cuboid);
    [
        DVec3::new(c.x, c.y + hh, c.z + hd),
        DVec3::new(c.x, c.y - hh, c.z + hd),
        DVec3::new(c.x, c.y - hh, c.z - hd),
        DVec3::new(c.x, c.y + hh, c.z - hd),
    ]
}

/// Corners of the top face, unrotated, in footprint order.
pub fn top_face_points(cuboid: &CuboidBox) -> [DVec3; 4] {
    let c = cuboid.center;
    let (hw, hh, hd) = half_extents(cuboid);
    let z = c.z + hd;
    [
        DVec3::new(c.x + hw, c.y + hh, z),
        DVec3::new(c.x + hw, c.y - hh, z),
        DVec3::new(c.x - hw, c.y - hh, z),
        DVec3::new(c.x - hw, c.y + hh, z),
    ]
}

/// Corners of the given face, unrotated.
pub fn face_points(cuboid: &CuboidBox, face: FaceKind) -> [DVec3; 4] {
    match face {
        FaceKind::Side => side_face_points(cuboid),
        FaceKind::Back => back_face_points(cuboid),
        FaceKind::Top => top_face_points(cuboid),
    }
}

/// The eight rotated corners of a box in world coordinates.
///
/// Bottom ring first, then the top ring, each in footprint order, so vertex
/// `i` and `i + 4` share an edge.
pub fn box_vertices(cuboid: &CuboidBox) -> [DVec3; 8] {
    let model = rotation_z_about(cuboid.center, normalize_rotation(cuboid.rotation));
    let c = cuboid.center;
    let (hw, hh, hd) = half_extents(cuboid);
    let ring = [(hw, hh), (hw, -hh), (-hw, -hh), (-hw, hh)];

    let mut vertices = [DVec3::ZERO; 8];
    for (i, (dx, dy)) in ring.iter().enumerate() {
        vertices[i] = model.transform_point3(DVec3::new(c.x + dx, c.y + dy, c.z - hd));
        vertices[i + 4] = model.transform_point3(DVec3::new(c.x + dx, c.y + dy, c.z + hd));
    }
    vertices
}

/// Point-in-polygon test where points on an edge or vertex count as inside.
///
/// Uses an even-odd crossing count, preceded by an explicit on-edge check so
/// boundary points and zero-area polygons behave predictably.
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[j], polygon[i]);
        if on_segment(point, a, b) {
            return true;
        }
        if (b.y > point.y) != (a.y > point.y) {
            let x_cross = (a.x - b.x) * (point.y - b.y) / (a.y - b.y) + b.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn on_segment(p: DVec2, a: DVec2, b: DVec2) -> bool {
    let ab = b - a;
    let ap = p - a;
    let len = ab.length();
    if len <= ON_EDGE_EPS {
        return ap.length() <= ON_EDGE_EPS;
    }
    let dist = ab.perp_dot(ap).abs() / len;
    let t = ap.dot(ab) / (len * len);
    let slack = ON_EDGE_EPS / len;
    dist <= ON_EDGE_EPS && t >= -slack && t <= 1.0 + slack
}
