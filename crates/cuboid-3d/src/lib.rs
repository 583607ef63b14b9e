#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Cuboid 3D
//!
//! Geometry for 3D bounding-box annotation over lidar point clouds:
//!
//! - [`geometry`]: footprint polygon and fixed-order face corners of a box
//! - [`calibration`]: Kitti `P * R * T` composition and lidar to image projection
//! - [`camera`]: camera poses and orthographic framing of the edit views
//! - [`projection`]: face projection onto the edit canvas and the inverse drag updates
//! - [`classifier`]: inside/outside tests over flat point buffers
//!
//! Every operation is a synchronous function over values owned by the caller;
//! nothing is cached between calls except inside an explicit
//! [`projection::FaceProjector`].
//!
//! ## Example
//!
//! ```rust
//! use cuboid_3d::classifier::count_points_in_box;
//! use cuboid_3d::types::CuboidBox;
//! use glam::DVec3;
//!
//! let cuboid = CuboidBox::new(DVec3::ZERO, 4.0, 2.0, 2.0, 0.0);
//! let points = [1.0, 0.0, 0.5, 3.0, 0.0, 0.5];
//! assert_eq!(count_points_in_box(&cuboid, &points).unwrap(), 1);
//! ```

/// Calibration composition and lidar to image projection.
pub mod calibration;

/// Camera poses for the orthogonal box views.
pub mod camera;

/// Point membership and recoloring.
pub mod classifier;

/// Error types.
pub mod error;

/// Cuboid footprint and face geometry.
pub mod geometry;

/// Tunable parameters.
pub mod params;

/// Flat point and color buffer views.
pub mod pointcloud;

/// Face projection and interactive editing.
pub mod projection;

/// 3D transforms.
pub mod transforms;

/// Annotation data types.
pub mod types;

pub use error::{CuboidError, CuboidResult};
pub use types::{CuboidBox, FaceKind, ViewFace};
