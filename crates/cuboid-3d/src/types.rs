use std::collections::HashMap;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A 3D bounding box annotation over a point cloud.
///
/// The box is centered at `center`, spans `width` along its local x axis,
/// `height` along local y and `depth` along z. `rotation` is a right-handed
/// rotation about z in radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuboidBox {
    /// Identifier assigned by the annotation store.
    #[serde(default)]
    pub id: String,
    /// Center of the box in lidar coordinates.
    #[serde(with = "xyz")]
    pub center: DVec3,
    /// Extent along the local x axis.
    pub width: f64,
    /// Extent along the local y axis.
    pub height: f64,
    /// Extent along the z axis.
    pub depth: f64,
    /// Rotation about z in radians.
    pub rotation: f64,
    /// Label attribute.
    #[serde(default)]
    pub attribute: String,
    /// Whether the annotation is marked valid.
    #[serde(default = "default_valid")]
    pub valid: bool,
    /// Track identifier across frames.
    #[serde(default, rename = "trackID", skip_serializing_if = "Option::is_none")]
    pub track_id: Option<u64>,
    /// Secondary attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_attribute: Option<HashMap<String, String>>,
}

fn default_valid() -> bool {
    true
}

impl CuboidBox {
    /// Create a valid, unlabeled box from its geometry.
    pub fn new(center: DVec3, width: f64, height: f64, depth: f64, rotation: f64) -> Self {
        Self {
            id: String::new(),
            center,
            width,
            height,
            depth,
            rotation,
            attribute: String::new(),
            valid: true,
            track_id: None,
            sub_attribute: None,
        }
    }

    /// The box extents as `(width, height, depth)`.
    #[inline]
    pub fn volume(&self) -> DVec3 {
        DVec3::new(self.width, self.height, self.depth)
    }
}

/// Canonical viewing directions for camera framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewFace {
    /// Looking at the box from +x.
    Front,
    /// Looking at the box from -x.
    Back,
    /// Looking at the box from +y.
    Left,
    /// Looking at the box from -y.
    Right,
    /// Looking down from +z.
    Top,
    /// Corner view from the left-front-top octant.
    LeftFrontTop,
    /// Corner view from the right-back-top octant.
    RightBackTop,
}

/// The face of a box edited in a 2D view.
///
/// Side faces lie in the local x-z plane, back faces in the local y-z plane
/// and top faces in the local x-y plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceKind {
    /// Face spanning width and depth.
    Side,
    /// Face spanning height and depth.
    Back,
    /// Face spanning width and height.
    Top,
}

impl From<ViewFace> for FaceKind {
    fn from(view: ViewFace) -> Self {
        match view {
            ViewFace::Left | ViewFace::Right => FaceKind::Side,
            ViewFace::Front | ViewFace::Back => FaceKind::Back,
            ViewFace::Top | ViewFace::LeftFrontTop | ViewFace::RightBackTop => FaceKind::Top,
        }
    }
}

/// Serialize a `DVec3` as `{ "x": .., "y": .., "z": .. }`.
mod xyz {
    use glam::DVec3;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xyz {
        x: f64,
        y: f64,
        z: f64,
    }

    pub fn serialize<S: Serializer>(v: &DVec3, serializer: S) -> Result<S::Ok, S::Error> {
        Xyz {
            x: v.x,
            y: v.y,
            z: v.z,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DVec3, D::Error> {
        let Xyz { x, y, z } = Xyz::deserialize(deserializer)?;
        Ok(DVec3::new(x, y, z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_store_json() -> Result<(), Box<dyn std::error::Error>> {
        let json = r#"{
            "id": "b1",
            "center": { "x": 1.0, "y": 2.0, "z": 0.5 },
            "width": 4.0,
            "height": 2.0,
            "depth": 1.5,
            "rotation": 0.25,
            "attribute": "car",
            "trackID": 7,
            "subAttribute": { "occluded": "yes" }
        }"#;
        let cuboid: CuboidBox = serde_json::from_str(json)?;
        assert_eq!(cuboid.center, DVec3::new(1.0, 2.0, 0.5));
        assert_eq!(cuboid.track_id, Some(7));
        assert!(cuboid.valid);
        assert_eq!(
            cuboid.sub_attribute.as_ref().and_then(|m| m.get("occluded")),
            Some(&"yes".to_string())
        );

        let back: CuboidBox = serde_json::from_str(&serde_json::to_string(&cuboid)?)?;
        assert_eq!(back, cuboid);
        Ok(())
    }

    #[test]
    fn test_face_kind_from_view() {
        assert_eq!(FaceKind::from(ViewFace::Left), FaceKind::Side);
        assert_eq!(FaceKind::from(ViewFace::Right), FaceKind::Side);
        assert_eq!(FaceKind::from(ViewFace::Front), FaceKind::Back);
        assert_eq!(FaceKind::from(ViewFace::Back), FaceKind::Back);
        assert_eq!(FaceKind::from(ViewFace::Top), FaceKind::Top);
        assert_eq!(FaceKind::from(ViewFace::LeftFrontTop), FaceKind::Top);
    }
}
