//! Stage-cached orchestration of one gradient analysis.
//!
//! The surrounding application drives a multi-step flow — pick a boundary,
//! fetch roads inside its buffered bounds, find the closest road, grid the
//! boundary, valuate — re-running single steps as the user changes
//! parameters. Each stage's result is cached here and dropped exactly when
//! one of its upstream inputs changes; upstream results survive.

use geo::{LineString, Polygon};
use valgrid_core::models::{ClosestRoad, DecayMode, Geometry, LonLatBounds, ValuedCell};
use valgrid_geo::{metrics, normalize, validation};

use crate::{grid, nearest, valuation};

/// Parameters of one valuation pass; a change invalidates only the
/// valuation cache.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationParams {
    pub mode: DecayMode,
    pub decay_k: f64,
    pub max_distance_override: Option<f64>,
}

/// One analysis in progress: the boundary, the fetched roads, and the cached
/// results of the downstream stages.
#[derive(Debug, Default)]
pub struct GradientSession {
    boundary: Option<Polygon>,
    roads: Vec<LineString>,
    closest: Option<ClosestRoad>,
    grid: Option<GridCache>,
    valuation: Option<ValuationCache>,
}

#[derive(Debug)]
struct GridCache {
    cell_size_m: f64,
    cells: Vec<Polygon>,
}

#[derive(Debug)]
struct ValuationCache {
    params: ValuationParams,
    cells: Vec<ValuedCell>,
}

impl GradientSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a fetched boundary geometry: normalize it to a single polygon
    /// and drop every downstream result.
    ///
    /// Returns the retained polygon, or `None` when the geometry offers no
    /// usable boundary (wrong kind, empty MultiPolygon, broken ring).
    pub fn set_boundary(&mut self, geometry: &Geometry) -> Option<&Polygon> {
        self.boundary = None;
        self.roads.clear();
        self.closest = None;
        self.grid = None;
        self.valuation = None;

        let polygon = normalize::normalize(geometry)?;
        let report = validation::check_boundary(&polygon);
        if !report.is_valid() {
            tracing::debug!(problems = ?report.problems, "rejecting boundary");
            return None;
        }
        tracing::debug!(kind = geometry.kind(), "boundary installed");
        self.boundary = Some(polygon);
        self.boundary.as_ref()
    }

    pub fn boundary(&self) -> Option<&Polygon> {
        self.boundary.as_ref()
    }

    /// Outer-ring area of the current boundary, m².
    pub fn boundary_area_sqm(&self) -> Option<f64> {
        self.boundary.as_ref().map(metrics::area_sqm)
    }

    /// Bounds to query the road service with: the boundary grown outward by
    /// `radius_m`. `None` when there is no boundary yet or buffering fails
    /// for this shape (callers may retry with a different radius).
    pub fn roads_query_bounds(&self, radius_m: f64) -> Option<LonLatBounds> {
        let boundary = self.boundary.as_ref()?;
        let grown = metrics::buffer(boundary, radius_m)?;
        metrics::bounding_box(&grown)
    }

    /// Install fetched roads, dropping results computed against the old set.
    ///
    /// The list is stored as supplied — closest-road indices refer to it —
    /// and structurally unusable entries are simply never selected.
    pub fn set_roads(&mut self, roads: Vec<LineString>) {
        self.closest = None;
        self.valuation = None;
        tracing::debug!(count = roads.len(), "roads installed");
        self.roads = roads;
    }

    pub fn roads(&self) -> &[LineString] {
        &self.roads
    }

    /// The road closest to the boundary, computed once per (boundary, roads)
    /// pair and cached. `None` while either input is missing.
    pub fn closest_road(&mut self) -> Option<&ClosestRoad> {
        if self.closest.is_none() {
            let boundary = self.boundary.as_ref()?;
            self.closest = nearest::find_closest_road(boundary, &self.roads);
        }
        self.closest.as_ref()
    }

    /// Clipped grid cells for the given cell size, regenerated only when the
    /// size (or an upstream input) changed. Empty while there is no boundary.
    pub fn grid(&mut self, cell_size_m: f64) -> &[Polygon] {
        let stale = match &self.grid {
            Some(cache) => cache.cell_size_m != cell_size_m,
            None => true,
        };
        if stale {
            self.valuation = None;
            let cells = match &self.boundary {
                Some(boundary) => grid::generate_grid(boundary, cell_size_m),
                None => Vec::new(),
            };
            tracing::debug!(cell_size_m, count = cells.len(), "grid regenerated");
            self.grid = Some(GridCache { cell_size_m, cells });
        }
        self.grid.as_ref().map(|cache| cache.cells.as_slice()).unwrap_or(&[])
    }

    /// Valued cells for the current grid and closest road, recomputed when
    /// the parameters or anything upstream changed. Empty while an upstream
    /// stage has nothing to offer.
    pub fn valuate(&mut self, params: ValuationParams) -> &[ValuedCell] {
        let stale = match &self.valuation {
            Some(cache) => cache.params != params,
            None => true,
        };
        if stale {
            let cells = self.compute_valuation(params);
            self.valuation = Some(ValuationCache { params, cells });
        }
        self.valuation.as_ref().map(|cache| cache.cells.as_slice()).unwrap_or(&[])
    }

    fn compute_valuation(&mut self, params: ValuationParams) -> Vec<ValuedCell> {
        let Some(road_index) = self.closest_road().map(|closest| closest.road_index) else {
            return Vec::new();
        };
        let Some(road) = self.roads.get(road_index) else {
            return Vec::new();
        };
        let Some(cache) = &self.grid else {
            return Vec::new();
        };
        valuation::valuate(
            &cache.cells,
            road,
            params.mode,
            params.decay_k,
            params.max_distance_override,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;

    fn square(west: f64, south: f64, side: f64) -> Polygon {
        Polygon::new(
            LineString::from(vec![
                (west, south),
                (west + side, south),
                (west + side, south + side),
                (west, south + side),
                (west, south),
            ]),
            vec![],
        )
    }

    fn linear() -> ValuationParams {
        ValuationParams { mode: DecayMode::Linear, decay_k: 0.0, max_distance_override: None }
    }

    #[test]
    fn test_stages_come_up_empty_without_inputs() {
        let mut session = GradientSession::new();
        assert!(session.boundary().is_none());
        assert!(session.roads_query_bounds(100.0).is_none());
        assert!(session.closest_road().is_none());
        assert!(session.grid(100.0).is_empty());
        assert!(session.valuate(linear()).is_empty());
    }

    #[test]
    fn test_boundary_normalizes_multipolygon() {
        let mut session = GradientSession::new();
        let parts = MultiPolygon::new(vec![square(0.0, 0.0, 0.01), square(5.0, 0.0, 0.1)]);
        let installed = session.set_boundary(&Geometry::MultiPolygon(parts.clone())).cloned();
        assert_eq!(installed.unwrap(), parts.0[1], "the larger part is retained");
    }

    #[test]
    fn test_unusable_geometry_clears_previous_boundary() {
        let mut session = GradientSession::new();
        session.set_boundary(&Geometry::Polygon(square(0.0, 0.0, 0.1)));
        assert!(session.boundary().is_some());

        let line = Geometry::LineString(LineString::from(vec![(0.0, 0.0), (1.0, 1.0)]));
        assert!(session.set_boundary(&line).is_none());
        assert!(session.boundary().is_none(), "a failed install must not leave stale state");
    }

    #[test]
    fn test_new_boundary_invalidates_roads_and_results() {
        let mut session = GradientSession::new();
        session.set_boundary(&Geometry::Polygon(square(0.0, 0.0, 0.1)));
        session.set_roads(vec![LineString::from(vec![(0.2, 0.0), (0.2, 0.1)])]);
        assert!(session.closest_road().is_some());
        assert!(!session.grid(1_000.0).is_empty());
        assert!(!session.valuate(linear()).is_empty());

        session.set_boundary(&Geometry::Polygon(square(1.0, 1.0, 0.1)));
        assert!(session.roads().is_empty(), "roads were fetched for the old boundary");
        assert!(session.closest_road().is_none());
        assert!(session.valuate(linear()).is_empty());
    }

    #[test]
    fn test_new_roads_invalidate_closest_but_keep_grid() {
        let mut session = GradientSession::new();
        session.set_boundary(&Geometry::Polygon(square(0.0, 0.0, 0.1)));
        session.set_roads(vec![LineString::from(vec![(0.2, 0.0), (0.2, 0.1)])]);
        assert_eq!(session.closest_road().unwrap().road_index, 0);
        let cells_before = session.grid(1_000.0).len();

        // A nearer road arrives at index 1 of the new list
        session.set_roads(vec![
            LineString::from(vec![(0.5, 0.0), (0.5, 0.1)]),
            LineString::from(vec![(0.11, 0.0), (0.11, 0.1)]),
        ]);
        assert_eq!(session.closest_road().unwrap().road_index, 1);
        assert_eq!(session.grid(1_000.0).len(), cells_before, "the grid only depends on the boundary");
    }

    #[test]
    fn test_cell_size_change_regenerates_grid() {
        let mut session = GradientSession::new();
        session.set_boundary(&Geometry::Polygon(square(0.0, 0.0, 0.1)));
        let coarse = session.grid(5_000.0).len();
        let fine = session.grid(1_000.0).len();
        assert!(fine > coarse, "finer cells mean more of them: {fine} vs {coarse}");
    }

    #[test]
    fn test_valuation_tracks_parameter_changes() {
        let mut session = GradientSession::new();
        session.set_boundary(&Geometry::Polygon(square(0.0, 0.0, 0.1)));
        session.set_roads(vec![LineString::from(vec![(0.2, 0.0), (0.2, 0.1)])]);
        session.grid(1_000.0);

        let linear_values: Vec<f64> =
            session.valuate(linear()).iter().map(|cell| cell.value).collect();
        let exponential = ValuationParams {
            mode: DecayMode::Exponential,
            decay_k: 0.0001,
            max_distance_override: None,
        };
        let exponential_values: Vec<f64> =
            session.valuate(exponential).iter().map(|cell| cell.value).collect();
        assert_eq!(linear_values.len(), exponential_values.len());
        assert_ne!(linear_values, exponential_values);
    }

    #[test]
    fn test_roads_query_bounds_grow_with_radius() {
        let mut session = GradientSession::new();
        session.set_boundary(&Geometry::Polygon(square(0.0, 0.0, 0.1)));
        let near = session.roads_query_bounds(100.0).unwrap();
        let far = session.roads_query_bounds(2_000.0).unwrap();
        assert!(far.contains(&near));
    }
}
