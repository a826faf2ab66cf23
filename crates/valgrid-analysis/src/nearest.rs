//! Nearest-road search between a boundary ring and candidate roads.

use geo::{Distance, Haversine, LineString, Point, Polygon};
use valgrid_core::models::ClosestRoad;
use valgrid_geo::metrics;

/// Find the road closest to the boundary's outer ring, along with the
/// shortest connecting segment found.
///
/// Both geometries are sampled at their vertices: every boundary vertex is
/// projected onto the road and every road vertex onto the ring, and the
/// smaller of the two directed minima becomes the road's candidate
/// distance. Dense OSM vertex spacing keeps the sampling error negligible
/// at city scale; a very sparsely vertexed road can miss the true minimum
/// between two of its vertices.
///
/// Ties between roads keep the lowest index. Returns `None` for an empty
/// road list or an unusable ring.
pub fn find_closest_road(boundary: &Polygon, roads: &[LineString]) -> Option<ClosestRoad> {
    let ring = boundary.exterior();
    if ring.0.len() < 2 || roads.is_empty() {
        return None;
    }
    let mut winner: Option<ClosestRoad> = None;
    for (road_index, road) in roads.iter().enumerate() {
        // Skip degenerate entries without shifting the indices of the rest
        if road.0.len() < 2 {
            continue;
        }
        let Some((distance_m, boundary_point, road_point)) = road_candidate(ring, road) else {
            continue;
        };
        let beats = match &winner {
            Some(best) => distance_m < best.distance_m,
            None => true,
        };
        if beats {
            winner = Some(ClosestRoad { road_index, distance_m, boundary_point, road_point });
        }
    }
    winner
}

// Candidate minimum for one road: (distance_m, boundary point, road point).
fn road_candidate(ring: &LineString, road: &LineString) -> Option<(f64, Point, Point)> {
    let from_boundary = directed_minimum(ring, road);
    let from_road = directed_minimum(road, ring)
        .map(|(distance, road_point, ring_point)| (distance, ring_point, road_point));
    match (from_boundary, from_road) {
        (Some(a), Some(b)) => Some(if b.0 < a.0 { b } else { a }),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

// Minimum over `from`'s vertices of the projection onto `onto`:
// (distance_m, vertex on `from`, nearest point on `onto`).
fn directed_minimum(from: &LineString, onto: &LineString) -> Option<(f64, Point, Point)> {
    let mut minimum: Option<(f64, Point, Point)> = None;
    for coord in &from.0 {
        let vertex = Point::from(*coord);
        let Some(nearest) = metrics::nearest_point_on_line(vertex, onto) else {
            continue;
        };
        let distance = Haversine.distance(vertex, nearest);
        let beats = match minimum {
            Some((best, _, _)) => distance < best,
            None => true,
        };
        if beats {
            minimum = Some((distance, vertex, nearest));
        }
    }
    minimum
}
