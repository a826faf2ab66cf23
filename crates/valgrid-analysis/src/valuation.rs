//! Distance-decay scoring of grid cells against the chosen road.

use geo::{LineString, Polygon};
use valgrid_core::models::{DecayMode, ValuedCell};
use valgrid_geo::metrics;

use crate::ramp;

/// Score every cell by its centroid's distance to `road`.
///
/// `max_distance_override` fixes the linear normalization distance; without
/// it the farthest cell defines the scale, floored to one meter so a grid
/// lying entirely on the road still divides cleanly. One output per input
/// cell, in input order; nothing is dropped here. An empty cell list or an
/// unusable road yields an empty result. `decay_k` is taken as given:
/// out-of-range values produce degenerate but well-defined scores.
pub fn valuate(
    cells: &[Polygon],
    road: &LineString,
    mode: DecayMode,
    decay_k: f64,
    max_distance_override: Option<f64>,
) -> Vec<ValuedCell> {
    if cells.is_empty() || road.0.len() < 2 {
        return Vec::new();
    }

    let distances: Vec<f64> = cells.iter().map(|cell| centroid_distance_m(cell, road)).collect();
    let observed_max = distances.iter().copied().fold(0.0_f64, f64::max);
    let max_distance_m = max_distance_override.unwrap_or_else(|| observed_max.max(1.0));

    cells
        .iter()
        .zip(distances)
        .map(|(cell, distance_m)| {
            let value = score(mode, distance_m, max_distance_m, decay_k);
            ValuedCell {
                cell: cell.clone(),
                distance_m,
                value,
                color: ramp::value_color(value),
            }
        })
        .collect()
}

// Centroid-to-road distance; a cell degenerate enough to have no centroid
// scores as sitting on the road.
fn centroid_distance_m(cell: &Polygon, road: &LineString) -> f64 {
    metrics::centroid(cell)
        .and_then(|centroid| metrics::point_to_line_distance_m(centroid, road))
        .unwrap_or(0.0)
}

fn score(mode: DecayMode, distance_m: f64, max_distance_m: f64, decay_k: f64) -> f64 {
    match mode {
        DecayMode::Linear => (1.0 - distance_m / max_distance_m).max(0.0),
        DecayMode::Exponential => (-decay_k * distance_m).exp(),
    }
}
