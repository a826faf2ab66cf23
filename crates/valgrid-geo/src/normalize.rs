//! Boundary normalization: collapse any fetched geometry to one polygon.

use geo::{Area, MultiPolygon, Polygon};
use valgrid_core::models::Geometry;

/// Reduce a fetched boundary geometry to a single polygon.
///
/// Polygons pass through unchanged. MultiPolygons collapse to their largest
/// part: users select one administrative boundary, and fragmented lookups
/// (island groups, exclaves) must resolve to the dominant shape. Every other
/// geometry kind yields `None` — "no usable boundary", not a fault.
pub fn normalize(geometry: &Geometry) -> Option<Polygon> {
    match geometry {
        Geometry::Polygon(polygon) => Some(polygon.clone()),
        Geometry::MultiPolygon(parts) => largest_polygon(parts),
        _ => None,
    }
}

/// The constituent with the largest planar outer-ring area; ties keep the
/// first part encountered. `None` when the MultiPolygon has no parts.
pub fn largest_polygon(parts: &MultiPolygon) -> Option<Polygon> {
    let mut winner: Option<(&Polygon, f64)> = None;
    for part in &parts.0 {
        let area = outer_ring_area(part);
        let beats = match winner {
            Some((_, best)) => area > best,
            None => true,
        };
        if beats {
            winner = Some((part, area));
        }
    }
    winner.map(|(part, _)| part.clone())
}

// Planar shoelace area of the outer ring alone; selection must not be
// swayed by holes.
fn outer_ring_area(polygon: &Polygon) -> f64 {
    Polygon::new(polygon.exterior().clone(), Vec::new()).unsigned_area()
}
