//! Result models produced by the analysis stages.

use geo::{coord, Line, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// Distance-to-value transfer function selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecayMode {
    /// `value = max(0, 1 - distance / max_distance)`
    #[default]
    Linear,
    /// `value = exp(-k * distance)`
    Exponential,
}

/// 8-bit RGB color produced by the value ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// CSS-style `#rrggbb` form, the shape the rendering layer consumes.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One clipped grid cell scored by the valuation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuedCell {
    pub cell: Polygon,
    /// Centroid-to-road distance in meters.
    pub distance_m: f64,
    /// Normalized score; in [0, 1] for well-formed decay parameters.
    pub value: f64,
    pub color: Rgb,
}

/// Outcome of the nearest-road search.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestRoad {
    /// Index of the winning road within the caller-supplied list.
    pub road_index: usize,
    /// Minimum distance found, meters.
    pub distance_m: f64,
    /// Boundary-side endpoint of the connecting segment.
    pub boundary_point: Point,
    /// Road-side endpoint of the connecting segment.
    pub road_point: Point,
}

impl ClosestRoad {
    /// The two-point connecting segment, boundary side first.
    pub fn segment(&self) -> Line {
        Line::new(self.boundary_point, self.road_point)
    }
}

/// Axis-aligned lon/lat bounds, the query shape for the external road fetch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLatBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl LonLatBounds {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            min_lon: rect.min().x,
            min_lat: rect.min().y,
            max_lon: rect.max().x,
            max_lat: rect.max().y,
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    /// Whether `other` lies entirely inside these bounds.
    pub fn contains(&self, other: &LonLatBounds) -> bool {
        self.min_lon <= other.min_lon
            && self.min_lat <= other.min_lat
            && self.max_lon >= other.max_lon
            && self.max_lat >= other.max_lat
    }
}
