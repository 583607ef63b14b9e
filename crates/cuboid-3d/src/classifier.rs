//! Box membership over flat point buffers, for cropping or recoloring a cloud.

use glam::DVec3;

use crate::error::CuboidResult;
use crate::geometry::{footprint_and_z_range, Footprint};
use crate::params::ClassifyParams;
use crate::pointcloud::{check_parallel, ColorBuffer, PointBuffer};
use crate::types::CuboidBox;

/// Fallback color for points at or below z = 0.
pub const COLOR_GROUND: [f32; 3] = [0.5, 0.5, 0.5];
/// Fallback color for 0 < z < 5.
pub const COLOR_LOW: [f32; 3] = [1.0, 0.0, 0.0];
/// Fallback color for 5 <= z < 10.
pub const COLOR_MID: [f32; 3] = [0.0, 1.0, 0.0];
/// Fallback color for z >= 10.
pub const COLOR_HIGH: [f32; 3] = [0.0, 0.0, 1.0];

/// Deterministic color of a point outside the highlighted box.
///
/// Depends only on the point coordinates, banded by height. A NaN height
/// falls through to the top band.
#[inline]
pub fn fallback_color(_x: f32, _y: f32, z: f32) -> [f32; 3] {
    if z <= 0.0 {
        COLOR_GROUND
    } else if z < 5.0 {
        COLOR_LOW
    } else if z < 10.0 {
        COLOR_MID
    } else {
        COLOR_HIGH
    }
}

/// How [`classify_points`] uses the membership result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    /// Copy the points inside the box into new buffers.
    Filter,
    /// Recolor the color buffer in place.
    Highlight,
}

/// Points and colors cropped to a box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredPoints {
    /// Flat buffer of the points inside the box.
    pub points: Vec<f32>,
    /// Flat buffer of their colors.
    pub colors: Vec<f32>,
}

impl FilteredPoints {
    /// Number of points kept.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len() / 3
    }

    /// Check if no point was kept.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Result of [`classify_points`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutput {
    /// Output of [`ClassifyMode::Filter`].
    Filtered(FilteredPoints),
    /// Output of [`ClassifyMode::Highlight`], with the number of points inside.
    Highlighted {
        /// Number of points that received the highlight color.
        inside: usize,
    },
}

/// Membership test against one box, precomputed once per call.
#[derive(Debug, Clone)]
pub struct PointClassifier {
    footprint: Footprint,
}

impl PointClassifier {
    /// Build the classifier for a box.
    pub fn new(cuboid: &CuboidBox) -> Self {
        Self {
            footprint: footprint_and_z_range(cuboid),
        }
    }

    /// The footprint the points are tested against.
    pub fn footprint(&self) -> &Footprint {
        &self.footprint
    }

    /// Whether a point is inside the box, boundary included.
    #[inline]
    pub fn contains(&self, point: [f32; 3]) -> bool {
        self.footprint.contains(DVec3::new(
            point[0] as f64,
            point[1] as f64,
            point[2] as f64,
        ))
    }

    /// Copy the points inside the box, and their colors, into new buffers.
    pub fn filter(&self, points: &[f32], colors: &[f32]) -> CuboidResult<FilteredPoints> {
        let points = PointBuffer::new(points)?;
        check_parallel(&points, colors.len())?;

        let mut out = FilteredPoints::default();
        for (point, color) in points.iter().zip(colors.chunks_exact(3)) {
            if self.contains(point) {
                out.points.extend_from_slice(&point);
                out.colors.extend_from_slice(color);
            }
        }
        Ok(out)
    }

    /// Recolor `colors` in place: `color` inside the box, [`fallback_color`] outside.
    ///
    /// Returns the number of points inside.
    pub fn highlight(&self, points: &[f32], colors: &mut [f32], color: [f32; 3]) -> CuboidResult<usize> {
        let points = PointBuffer::new(points)?;
        let mut colors = ColorBuffer::new(colors, &points)?;

        let mut inside = 0;
        for (i, point) in points.iter().enumerate() {
            if self.contains(point) {
                colors.set(i, color);
                inside += 1;
            } else {
                colors.set(i, fallback_color(point[0], point[1], point[2]));
            }
        }
        Ok(inside)
    }

    /// Number of points inside the box.
    pub fn count(&self, points: &[f32]) -> CuboidResult<usize> {
        let points = PointBuffer::new(points)?;
        Ok(points.iter().filter(|p| self.contains(*p)).count())
    }
}

/// Crop a flat point buffer, and its parallel color buffer, to a box.
///
/// The colors are only read, so a shared borrow is enough.
pub fn filter_points(cuboid: &CuboidBox, points: &[f32], colors: &[f32]) -> CuboidResult<FilteredPoints> {
    let filtered = PointClassifier::new(cuboid).filter(points, colors)?;
    log::debug!(
        "filtered {} of {} points into box {}",
        filtered.len(),
        points.len() / 3,
        cuboid.id
    );
    Ok(filtered)
}

/// Recolor a flat color buffer in place against a box.
///
/// Returns the number of points that received `params.highlight_color`.
pub fn highlight_points(
    cuboid: &CuboidBox,
    points: &[f32],
    colors: &mut [f32],
    params: &ClassifyParams,
) -> CuboidResult<usize> {
    let inside = PointClassifier::new(cuboid).highlight(points, colors, params.highlight_color)?;
    log::debug!(
        "highlighted {} of {} points in box {}",
        inside,
        points.len() / 3,
        cuboid.id
    );
    Ok(inside)
}

/// Classify a flat point buffer against a box.
///
/// A point is inside when its xy lies in the rotated footprint and its z in
/// `[z_min, z_max]`, boundaries included. In [`ClassifyMode::Filter`] the
/// matching points and colors are copied out and `colors` is left untouched;
/// in [`ClassifyMode::Highlight`] `colors` is overwritten in place.
///
/// Callers that only crop can use [`filter_points`], which borrows the colors
/// immutably.
///
/// # Errors
///
/// Fails if a buffer length is not a multiple of 3 or if the buffers differ
/// in length.
pub fn classify_points(
    cuboid: &CuboidBox,
    points: &[f32],
    colors: &mut [f32],
    mode: ClassifyMode,
    params: &ClassifyParams,
) -> CuboidResult<ClassifyOutput> {
    match mode {
        ClassifyMode::Filter => Ok(ClassifyOutput::Filtered(filter_points(cuboid, points, colors)?)),
        ClassifyMode::Highlight => Ok(ClassifyOutput::Highlighted {
            inside: highlight_points(cuboid, points, colors, params)?,
        }),
    }
}

/// Number of points of a flat buffer inside a box.
pub fn count_points_in_box(cuboid: &CuboidBox, points: &[f32]) -> CuboidResult<usize> {
    PointClassifier::new(cuboid).count(points)
}
