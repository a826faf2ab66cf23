//! Square-grid generation clipped to a boundary polygon.

use geo::{coord, Area, BooleanOps, Intersects, Polygon, Rect};
use valgrid_geo::metrics;

/// Tile the boundary's bounding box with square cells of side `cell_size_m`
/// and clip every intersecting tile to the boundary.
///
/// A concave boundary can split a tile into disjoint pieces; each piece
/// becomes its own output cell, so every returned polygon is simple. Tiles
/// whose clip comes back degenerate are skipped and the rest of the grid is
/// still returned. Output order is row-major from the southwest corner and
/// stable for identical inputs.
///
/// An empty boundary or a non-positive cell size yields an empty grid.
pub fn generate_grid(boundary: &Polygon, cell_size_m: f64) -> Vec<Polygon> {
    if !cell_size_m.is_finite() || cell_size_m <= 0.0 {
        return Vec::new();
    }
    if boundary.exterior().0.len() < 4 {
        return Vec::new();
    }
    let Some(bounds) = metrics::bounding_box(boundary) else {
        return Vec::new();
    };

    let center_lat = 0.5 * (bounds.min_lat + bounds.max_lat);
    let (lon_step, lat_step) = metrics::degree_spans(cell_size_m, center_lat);
    if !lon_step.is_finite() || lon_step <= 0.0 || lat_step <= 0.0 {
        return Vec::new();
    }
    let columns = ((bounds.max_lon - bounds.min_lon) / lon_step).ceil() as usize;
    let rows = ((bounds.max_lat - bounds.min_lat) / lat_step).ceil() as usize;

    let mut cells = Vec::new();
    for row in 0..rows {
        let south = bounds.min_lat + row as f64 * lat_step;
        for column in 0..columns {
            let west = bounds.min_lon + column as f64 * lon_step;
            let tile = Rect::new(
                coord! { x: west, y: south },
                coord! { x: west + lon_step, y: south + lat_step },
            )
            .to_polygon();
            if !tile.intersects(boundary) {
                continue;
            }
            for part in tile.intersection(boundary) {
                if is_usable_cell(&part) {
                    cells.push(part);
                } else {
                    tracing::debug!(row, column, "dropping degenerate clipped cell");
                }
            }
        }
    }
    cells
}

// A usable cell has a closed ring with real area; a tile that only grazes
// the boundary clips to a zero-area sliver.
fn is_usable_cell(cell: &Polygon) -> bool {
    cell.exterior().0.len() >= 4 && cell.unsigned_area() > 0.0
}
