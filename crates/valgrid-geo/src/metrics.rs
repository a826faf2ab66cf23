//! Metric utilities over lon/lat geometry.
//!
//! Every function here accepts and returns meters at its boundary.
//! Conversion into the backend's degree space happens inside this module
//! and nowhere else, against the mean earth radius the spherical primitives
//! assume.

use geo::{
    BoundingRect, Buffer, Centroid, ChamberlainDuquetteArea, Closest, ClosestPoint, Distance,
    Haversine, LineString, Point, Polygon,
};
use valgrid_core::models::LonLatBounds;

use crate::normalize::largest_polygon;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Spherical-approximation area of the polygon's outer ring, m².
///
/// Holes are deliberately not subtracted: the single number shown to users
/// is the outer footprint.
pub fn area_sqm(polygon: &Polygon) -> f64 {
    let outer = Polygon::new(polygon.exterior().clone(), Vec::new());
    outer.chamberlain_duquette_unsigned_area()
}

/// Axis-aligned lon/lat bounds, or `None` for an empty ring.
pub fn bounding_box(polygon: &Polygon) -> Option<LonLatBounds> {
    polygon.bounding_rect().map(LonLatBounds::from_rect)
}

/// Grow the polygon outward by `radius_m` meters.
///
/// Returns `None` when the radius is not a usable non-negative distance or
/// the backend produces a degenerate shape; callers treat that as
/// "buffering unavailable for this shape" and may retry with another
/// radius.
pub fn buffer(polygon: &Polygon, radius_m: f64) -> Option<Polygon> {
    if !radius_m.is_finite() || radius_m < 0.0 {
        return None;
    }
    if radius_m == 0.0 {
        return Some(polygon.clone());
    }
    let grown = polygon.buffer(lat_degrees(radius_m));
    let Some(merged) = largest_polygon(&grown) else {
        tracing::debug!(radius_m, "buffer produced no usable shape");
        return None;
    };
    if merged.exterior().0.len() < 4 {
        tracing::debug!(radius_m, "buffer produced a degenerate ring");
        return None;
    }
    Some(merged)
}

/// Representative interior point.
pub fn centroid(polygon: &Polygon) -> Option<Point> {
    polygon.centroid()
}

/// Nearest point on any segment of `line` to `point` (true projection, not
/// an endpoint scan).
pub fn nearest_point_on_line(point: Point, line: &LineString) -> Option<Point> {
    if line.0.len() < 2 {
        return None;
    }
    match line.closest_point(&point) {
        Closest::SinglePoint(nearest) | Closest::Intersection(nearest) => Some(nearest),
        Closest::Indeterminate => None,
    }
}

/// Shortest distance in meters from `point` to any segment of `line`.
pub fn point_to_line_distance_m(point: Point, line: &LineString) -> Option<f64> {
    nearest_point_on_line(point, line).map(|nearest| Haversine.distance(point, nearest))
}

/// A meter span converted to degree spans at the given latitude:
/// `(lon_degrees, lat_degrees)`.
pub fn degree_spans(meters: f64, at_lat: f64) -> (f64, f64) {
    let lat = lat_degrees(meters);
    let lon = lat / at_lat.to_radians().cos();
    (lon, lat)
}

fn lat_degrees(meters: f64) -> f64 {
    (meters / EARTH_RADIUS_M).to_degrees()
}
