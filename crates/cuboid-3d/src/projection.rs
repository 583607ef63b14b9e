//! Face projection onto the 2D edit canvas and the inverse drag updates.
//!
//! Forward path for a face corner `p`:
//!
//! ```text
//! canvas = CanvasMap * Projection * View * Model(box) * p
//! ```
//!
//! where `Model` rotates the unrotated face corners about the box center and
//! `View` is the camera's world to camera transform. The inverse path maps 2D
//! drag deltas back into center offsets, which are then applied with a
//! face-specific rotation sign.

use glam::{DMat4, DVec2, DVec3};

use crate::camera::{orthographic_params_for_face, CameraPose};
use crate::geometry::{face_points, non_negative, top_face_points};
use crate::params::ViewParams;
use crate::transforms::{normalize_rotation, rotate_vector_z, rotation_z_about};
use crate::types::{CuboidBox, FaceKind, ViewFace};

/// World pose of a box: rotation about its center, independent of any camera.
#[inline]
pub fn model_transform(cuboid: &CuboidBox) -> DMat4 {
    rotation_z_about(cuboid.center, normalize_rotation(cuboid.rotation))
}

/// Map normalized device coordinates to canvas pixels.
///
/// `x' = x * w / 2 + w / 2` and `y' = y * h / 2 + h / 2`; z is left untouched.
pub fn canvas_map(viewport: DVec2) -> DMat4 {
    let half = viewport / 2.0;
    DMat4::from_translation(DVec3::new(half.x, half.y, 0.0))
        * DMat4::from_scale(DVec3::new(half.x, half.y, 1.0))
}

/// A face projected onto the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceProjection {
    /// Canvas corners in face order; corners 0 and 2 are opposite.
    pub polygon: [DVec2; 4],
    /// Suggested display zoom for the edit view.
    pub zoom: f64,
}

/// Display zoom fitting the box into the viewport, `min(w / width, h / height) / 2`.
#[inline]
pub fn suggested_zoom(cuboid: &CuboidBox, viewport: DVec2) -> f64 {
    (viewport.x / cuboid.width).min(viewport.y / cuboid.height) / 2.0
}

/// Project the face seen from `view` onto the canvas.
///
/// Left/right views project the side face, front/back views the back face and
/// the remaining views the top face.
///
/// `projection` must be the camera projection at zoom 1, see
/// [`crate::camera::OrthographicParams::projection_matrix`]; a zoomed
/// projection scales the polygon.
///
/// # Arguments
///
/// * `cuboid` - The box to project.
/// * `view` - The view selecting the face.
/// * `viewport` - Canvas size in pixels.
/// * `view_matrix` - World to camera transform (the camera's inverse world matrix).
/// * `projection` - Camera projection matrix.
pub fn project_face_to_canvas(
    cuboid: &CuboidBox,
    view: ViewFace,
    viewport: DVec2,
    view_matrix: &DMat4,
    projection: &DMat4,
) -> FaceProjection {
    let composed = canvas_map(viewport) * *projection * *view_matrix * model_transform(cuboid);
    let polygon = face_points(cuboid, FaceKind::from(view))
        .map(|p| composed.project_point3(p).truncate());

    FaceProjection {
        polygon,
        zoom: suggested_zoom(cuboid, viewport),
    }
}

/// Project the top face for the top-down edit view without a camera.
///
/// The rotated corners are swapped to `(y, x)` and mirrored into a
/// viewport-centered frame: `x' = -(x - w / 2)`, `y' = -(y - h / 2)`.
pub fn project_top_face_simplified(cuboid: &CuboidBox, viewport: DVec2) -> [DVec2; 4] {
    let model = model_transform(cuboid);
    let half = viewport / 2.0;
    top_face_points(cuboid).map(|p| {
        let q = model.transform_point3(p);
        let swapped = DVec2::new(q.y, q.x);
        DVec2::new(-(swapped.x - half.x), -(swapped.y - half.y))
    })
}

/// Apply a drag from the side face edit view.
///
/// `offset_center` is a box-local offset; it is rotated by the box rotation
/// into world space and added to the center. `offset_width` and
/// `offset_depth` are added to width and depth.
pub fn apply_side_drag(
    cuboid: &CuboidBox,
    offset_center: DVec3,
    offset_width: f64,
    offset_depth: f64,
) -> CuboidBox {
    let rotation = normalize_rotation(cuboid.rotation);
    CuboidBox {
        center: cuboid.center + rotate_vector_z(offset_center, rotation),
        width: non_negative(cuboid.width + offset_width),
        depth: non_negative(cuboid.depth + offset_depth),
        ..cuboid.clone()
    }
}

/// Apply a drag from the back face edit view.
///
/// The back face is mirrored relative to the side face, so `offset_center` is
/// rotated by the negated box rotation. `offset_width` resizes the height and
/// `offset_depth` the depth.
pub fn apply_back_drag(
    cuboid: &CuboidBox,
    offset_center: DVec3,
    offset_width: f64,
    offset_depth: f64,
) -> CuboidBox {
    let rotation = normalize_rotation(cuboid.rotation);
    CuboidBox {
        center: cuboid.center + rotate_vector_z(offset_center, -rotation),
        height: non_negative(cuboid.height + offset_width),
        depth: non_negative(cuboid.depth + offset_depth),
        ..cuboid.clone()
    }
}

/// Apply a drag from the top face edit view.
///
/// Same as the side face: forward rotation of `offset_center`, then resize of
/// width and height.
pub fn apply_top_drag(
    cuboid: &CuboidBox,
    offset_center: DVec3,
    offset_width: f64,
    offset_height: f64,
) -> CuboidBox {
    let rotation = normalize_rotation(cuboid.rotation);
    CuboidBox {
        center: cuboid.center + rotate_vector_z(offset_center, rotation),
        width: non_negative(cuboid.width + offset_width),
        height: non_negative(cuboid.height + offset_height),
        ..cuboid.clone()
    }
}

/// A 2D edit converted to box units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOffsets {
    /// Center offset in the frame the face's update rule rotates out of:
    /// box-local for the side and top faces, mirrored for the back face.
    pub center: DVec3,
    /// Change of `(width, height, depth)`.
    pub size: DVec3,
}

/// Apply drag offsets using the update rule of the given face.
pub fn apply_face_drag(cuboid: &CuboidBox, face: FaceKind, offsets: &DragOffsets) -> CuboidBox {
    match face {
        FaceKind::Side => apply_side_drag(cuboid, offsets.center, offsets.size.x, offsets.size.z),
        FaceKind::Back => apply_back_drag(cuboid, offsets.center, offsets.size.y, offsets.size.z),
        FaceKind::Top => apply_top_drag(cuboid, offsets.center, offsets.size.x, offsets.size.y),
    }
}

/// Cached face projection for one interaction sequence.
///
/// Holds the composed model to canvas matrix and its inverse so that repeated
/// pointer moves during a drag reuse them. Rebuild it when the box, view,
/// viewport or camera changes.
#[derive(Debug, Clone)]
pub struct FaceProjector {
    face: FaceKind,
    rotation: f64,
    matrix: DMat4,
    inverse: DMat4,
    zoom: f64,
}

impl FaceProjector {
    /// Compose the projection of `cuboid` seen from `view`.
    ///
    /// The inverse is only meaningful for affine projections, i.e.
    /// orthographic cameras.
    pub fn new(
        cuboid: &CuboidBox,
        view: ViewFace,
        viewport: DVec2,
        view_matrix: &DMat4,
        projection: &DMat4,
    ) -> Self {
        let matrix = canvas_map(viewport) * *projection * *view_matrix * model_transform(cuboid);
        Self {
            face: FaceKind::from(view),
            rotation: normalize_rotation(cuboid.rotation),
            matrix,
            inverse: matrix.inverse(),
            zoom: suggested_zoom(cuboid, viewport),
        }
    }

    /// Frame `cuboid` with the orthographic edit camera for `view`.
    pub fn for_view(cuboid: &CuboidBox, view: ViewFace, viewport: DVec2, params: &ViewParams) -> Self {
        let pose = CameraPose::for_view(cuboid, view, params.distance);
        let ortho = orthographic_params_for_face(cuboid, FaceKind::from(view), params);
        Self::new(
            cuboid,
            view,
            viewport,
            &pose.view_matrix(),
            &ortho.projection_matrix(),
        )
    }

    /// The face this projector edits.
    #[inline]
    pub fn face(&self) -> FaceKind {
        self.face
    }

    /// The composed model to canvas matrix.
    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    /// Suggested display zoom.
    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Project the edited face of `cuboid` onto the canvas.
    pub fn project(&self, cuboid: &CuboidBox) -> [DVec2; 4] {
        face_points(cuboid, self.face).map(|p| self.matrix.project_point3(p).truncate())
    }

    /// Convert an edited face polygon into drag offsets for [`apply_face_drag`].
    ///
    /// Corners 0 and 2 of both polygons are taken as opposite corners: the
    /// center offset follows their midpoint and the size change follows
    /// their diagonal. Canvas deltas carry no depth, so the offset along the
    /// viewing axis is zero.
    ///
    /// The inverse projection yields a box-local offset `v`, which the side
    /// and top rules rotate by `+rotation`. The back rule rotates by
    /// `-rotation`, so its offset is pre-rotated by `2 * rotation` to land on
    /// the same world delta.
    pub fn unproject_drag(&self, before: &[DVec2; 4], after: &[DVec2; 4]) -> DragOffsets {
        let to_local = |d: DVec2| self.inverse.transform_vector3(DVec3::new(d.x, d.y, 0.0));

        let mid_before = (before[0] + before[2]) / 2.0;
        let mid_after = (after[0] + after[2]) / 2.0;

        // corner 2 minus corner 0 is the negated size vector in local axes
        let diag_before = before[2] - before[0];
        let diag_after = after[2] - after[0];

        let local_center = to_local(mid_after - mid_before);
        let center = match self.face {
            FaceKind::Back => rotate_vector_z(local_center, 2.0 * self.rotation),
            FaceKind::Side | FaceKind::Top => local_center,
        };

        DragOffsets {
            center,
            size: to_local(diag_before - diag_after),
        }
    }
}
