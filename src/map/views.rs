//! Named map views.
//!
//! A view couples a projection with a display extent in projected
//! coordinates. The two presets match the fixed views the sample
//! figures use: a whole-globe plate carrée and a north-polar azimuthal
//! window over Eurasia.

use std::collections::HashMap;
use std::ops::Range;

use once_cell::sync::Lazy;

use crate::error::{Result, VisplotError};

use super::projection::Projection;

/// Names accepted by [`get_view`].
pub const VIEW_NAMES: [&str; 2] = ["global", "eurasia"];

/// A projection plus the window of projected coordinates to display.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub name: String,
    pub projection: Projection,
    /// Display window as [x_min, x_max, y_min, y_max].
    pub extent: [f64; 4],
}

impl MapView {
    pub fn x_range(&self) -> Range<f64> {
        self.extent[0]..self.extent[1]
    }

    pub fn y_range(&self) -> Range<f64> {
        self.extent[2]..self.extent[3]
    }

    /// Whether a projected point falls inside the display window, with a
    /// small tolerance so boundary graticule lines survive clipping.
    pub fn contains(&self, point: (f64, f64)) -> bool {
        let eps_x = (self.extent[1] - self.extent[0]).abs() * 1e-9;
        let eps_y = (self.extent[3] - self.extent[2]).abs() * 1e-9;
        point.0 >= self.extent[0] - eps_x
            && point.0 <= self.extent[1] + eps_x
            && point.1 >= self.extent[2] - eps_y
            && point.1 <= self.extent[3] + eps_y
    }
}

static VIEWS: Lazy<HashMap<&'static str, MapView>> = Lazy::new(|| {
    let mut views = HashMap::new();
    views.insert(
        "global",
        MapView {
            name: "global".to_string(),
            projection: Projection::Equirectangular,
            extent: [-180.0, 180.0, -90.0, 90.0],
        },
    );
    views.insert(
        "eurasia",
        MapView {
            name: "eurasia".to_string(),
            projection: Projection::LambertAzimuthalEqualArea {
                center_lon: 0.0,
                center_lat: 90.0,
            },
            extent: [
                -1_053_702.958,
                3_417_796.998_000_001,
                -4_560_734.802,
                1_115_265.241_999_999_2,
            ],
        },
    );
    views
});

/// Get a map view by name (case-insensitive).
pub fn get_view(name: &str) -> Result<MapView> {
    VIEWS
        .get(name.to_lowercase().as_str())
        .cloned()
        .ok_or_else(|| VisplotError::InvalidParameter {
            param: "view".to_string(),
            message: format!(
                "Unknown view: {} (supported: {})",
                name,
                VIEW_NAMES.join(", ")
            ),
        })
}
