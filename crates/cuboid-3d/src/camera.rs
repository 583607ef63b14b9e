//! Camera poses and orthographic framing for the orthogonal box views.
//!
//! Cameras are plain values: nothing here reads or mutates shared camera
//! state, every projection call receives the matrices it needs.

use glam::{DMat4, DVec3};

use crate::params::ViewParams;
use crate::transforms::{normalize_rotation, rotate_vector_z, rotation_z, translation};
use crate::types::{CuboidBox, FaceKind, ViewFace};

/// Offset from the box center to the camera before the box rotation is applied.
///
/// Axis-aligned views sit `distance` away along x (front/back), y (left/right)
/// or z (top). Corner views are offset by half the box volume instead.
pub fn perspective_shift(view: ViewFace, distance: f64, volume: DVec3) -> DVec3 {
    let half = volume / 2.0;
    match view {
        ViewFace::Front => DVec3::new(distance, 0.0, 0.0),
        ViewFace::Back => DVec3::new(-distance, 0.0, 0.0),
        ViewFace::Left => DVec3::new(0.0, distance, 0.0),
        ViewFace::Right => DVec3::new(0.0, -distance, 0.0),
        ViewFace::Top => DVec3::new(0.0, 0.0, distance),
        ViewFace::LeftFrontTop => DVec3::new(half.x, half.y, half.z),
        ViewFace::RightBackTop => DVec3::new(-half.x, -half.y, half.z),
    }
}

/// Camera position looking at a box from the requested view.
///
/// Computed as `TBack(Rz(TFrom(Tc(center))))`: the center is shifted by the
/// view offset, moved to the origin, rotated about z by the box rotation and
/// moved back. The order is load-bearing, any other order aims the camera at
/// the wrong face once the box is rotated.
///
/// # Arguments
///
/// * `center` - Center of the box.
/// * `rotation` - Box rotation about z in radians.
/// * `volume` - Box extents `(width, height, depth)`.
/// * `view` - The requested view.
/// * `distance` - Camera distance for the axis-aligned views.
pub fn camera_position_for_view(
    center: DVec3,
    rotation: f64,
    volume: DVec3,
    view: ViewFace,
    distance: f64,
) -> DVec3 {
    let tc = translation(perspective_shift(view, distance, volume));
    let t_from = translation(-center);
    let t_back = translation(center);
    let rz = rotation_z(normalize_rotation(rotation));

    (t_back * rz * t_from * tc).transform_point3(center)
}

/// A camera placed in the world, looking at a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Camera position in world coordinates.
    pub position: DVec3,
    /// The point the camera looks at.
    pub target: DVec3,
    /// The camera up direction.
    pub up: DVec3,
}

impl CameraPose {
    /// Frame a box from the requested view.
    ///
    /// The top view uses the rotated box x axis as up since world z is the
    /// viewing direction, every other view uses world z.
    pub fn for_view(cuboid: &CuboidBox, view: ViewFace, distance: f64) -> Self {
        let position = camera_position_for_view(
            cuboid.center,
            cuboid.rotation,
            cuboid.volume(),
            view,
            distance,
        );
        let up = match view {
            ViewFace::Top => rotate_vector_z(DVec3::X, normalize_rotation(cuboid.rotation)),
            _ => DVec3::Z,
        };
        Self {
            position,
            target: cuboid.center,
            up,
        }
    }

    /// World to camera transform, the inverse of the camera's world matrix.
    #[inline]
    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Camera to world transform.
    #[inline]
    pub fn world_matrix(&self) -> DMat4 {
        self.view_matrix().inverse()
    }
}

/// Orthographic frustum framing one face of a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicParams {
    /// Left clipping plane.
    pub left: f64,
    /// Right clipping plane.
    pub right: f64,
    /// Top clipping plane.
    pub top: f64,
    /// Bottom clipping plane.
    pub bottom: f64,
    /// Near clipping distance.
    pub near: f64,
    /// Far clipping distance.
    pub far: f64,
    /// Suggested display zoom.
    pub zoom: f64,
}

impl OrthographicParams {
    /// Projection matrix at zoom 1.
    ///
    /// This is the matrix the face projection expects; the suggested zoom is
    /// applied by the renderer, not baked into the projected polygon.
    pub fn projection_matrix(&self) -> DMat4 {
        self.projection_matrix_with_zoom(1.0)
    }

    /// Projection matrix with the frustum shrunk around its center by `zoom`.
    pub fn projection_matrix_with_zoom(&self, zoom: f64) -> DMat4 {
        let cx = (self.left + self.right) / 2.0;
        let cy = (self.top + self.bottom) / 2.0;
        let dx = (self.right - self.left) / (2.0 * zoom);
        let dy = (self.top - self.bottom) / (2.0 * zoom);
        DMat4::orthographic_rh_gl(cx - dx, cx + dx, cy - dy, cy + dy, self.near, self.far)
    }
}

/// Orthographic framing of a box face with a margin on every side.
///
/// The frustum is `extent / 2 + margin` wide in each screen direction. Along
/// the viewing axis it spans the box plus the margin as seen from a camera
/// `params.distance` away from the center, as placed by
/// [`CameraPose::for_view`]: `near = distance - reach` and
/// `far = distance + reach` with `reach = extent / 2 + margin`. `near` goes
/// negative when the framed volume reaches behind the camera, which an
/// orthographic projection accepts. The suggested display zoom is
/// `params.zoom_scale / reach`.
pub fn orthographic_params_for_face(
    cuboid: &CuboidBox,
    face: FaceKind,
    params: &ViewParams,
) -> OrthographicParams {
    let half = cuboid.volume() / 2.0;
    // (screen horizontal, screen vertical, viewing axis)
    let (horizontal, vertical, along) = match face {
        FaceKind::Side => (half.x, half.z, half.y),
        FaceKind::Back => (half.y, half.z, half.x),
        FaceKind::Top => (half.y, half.x, half.z),
    };
    let m = params.margin;
    let reach = along + m;

    OrthographicParams {
        left: -(horizontal + m),
        right: horizontal + m,
        top: vertical + m,
        bottom: -(vertical + m),
        near: params.distance - reach,
        far: params.distance + reach,
        zoom: params.zoom_scale / reach,
    }
}

/// Orthographic framing of the front/back face with the default margin.
pub fn orthographic_params_for_box(cuboid: &CuboidBox) -> OrthographicParams {
    orthographic_params_for_face(cuboid, FaceKind::Back, &ViewParams::default())
}
