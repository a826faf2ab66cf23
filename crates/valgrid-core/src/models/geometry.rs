//! Canonical geometry type shared across the valgrid crates.
//!
//! A tagged wrapper around the `geo` crate's geometry kinds. External service
//! responses enter the pipeline through this enum (via [`crate::convert`]),
//! so the analysis crates never touch raw GeoJSON.

use geo::{LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};

/// A single geometry value with its GeoJSON kind made explicit.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    /// GeoJSON name of this geometry's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::LineString(_) => "LineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(polygon)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(parts: MultiPolygon) -> Self {
        Geometry::MultiPolygon(parts)
    }
}

impl From<LineString> for Geometry {
    fn from(line: LineString) -> Self {
        Geometry::LineString(line)
    }
}
