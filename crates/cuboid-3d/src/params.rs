use serde::{Deserialize, Serialize};

/// Parameters for camera framing of the orthogonal edit views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewParams {
    /// Distance from the box center to the camera for the axis-aligned views.
    pub distance: f64,
    /// Margin added around the framed face, in world units.
    pub margin: f64,
    /// Scale of the orthographic zoom, `zoom = zoom_scale / near`.
    pub zoom_scale: f64,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            distance: 10.0,
            margin: 10.0,
            zoom_scale: 500.0,
        }
    }
}

/// Parameters for the point classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifyParams {
    /// RGB color in [0, 1] written to the points inside the box in highlight mode.
    pub highlight_color: [f32; 3],
}

impl Default for ClassifyParams {
    fn default() -> Self {
        Self {
            highlight_color: [0.0, 1.0, 1.0],
        }
    }
}
