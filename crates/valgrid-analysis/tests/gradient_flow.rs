//! End-to-end run of the analysis flow on a toy boundary: a 1°×1° square
//! with a single vertical road one degree east of it.

use valgrid_analysis::pipeline::{GradientSession, ValuationParams};
use valgrid_core::convert;
use valgrid_core::models::DecayMode;

fn boundary() -> valgrid_core::models::Geometry {
    let raw = r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]]}"#;
    let geojson::GeoJson::Geometry(geometry) = raw.parse().unwrap() else {
        panic!("boundary fixture must parse as a geometry");
    };
    convert::geometry_from_geojson(&geometry).unwrap()
}

fn roads() -> Vec<geo::LineString> {
    let raw = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"highway":"primary"},
         "geometry":{"type":"LineString","coordinates":[[2.0,0.0],[2.0,1.0]]}}
    ]}"#;
    let collection: geojson::FeatureCollection = raw.parse().unwrap();
    convert::road_lines(&collection)
}

#[test]
fn test_full_gradient_flow_over_single_cell() {
    let mut session = GradientSession::new();

    let installed = session.set_boundary(&boundary());
    assert!(installed.is_some(), "the square is a usable boundary");

    // ~12,300 km² for a 1°×1° patch at the equator
    let area = session.boundary_area_sqm().unwrap();
    assert!(
        (11.0e9..14.0e9).contains(&area),
        "implausible area for the toy square: {area} m²"
    );

    let query = session.roads_query_bounds(500.0).unwrap();
    assert!(query.min_lon < 0.0 && query.max_lon > 1.0, "query bounds grow past the square");

    session.set_roads(roads());
    let closest = session.closest_road().unwrap().clone();
    assert_eq!(closest.road_index, 0);
    assert!(
        (closest.boundary_point.x() - 1.0).abs() < 1e-9,
        "the connecting segment starts on the square's right edge"
    );
    assert!((closest.road_point.x() - 2.0).abs() < 1e-9, "and ends on the road");
    // One degree of longitude at the winning latitude
    assert!(
        (closest.distance_m - 111_178.0).abs() < 100.0,
        "got {} m",
        closest.distance_m
    );

    // A cell far larger than the square collapses the grid to one cell
    let cells = session.grid(200_000.0).to_vec();
    assert_eq!(cells.len(), 1);
    let cell_area = valgrid_geo::metrics::area_sqm(&cells[0]);
    assert!(((cell_area / area) - 1.0).abs() < 0.01, "the lone cell covers the square");

    // With a single cell its own distance is the observed maximum, so the
    // default linear score collapses to zero. Documented boundary behavior.
    let params =
        ValuationParams { mode: DecayMode::Linear, decay_k: 0.0, max_distance_override: None };
    let valued = session.valuate(params).to_vec();
    assert_eq!(valued.len(), 1);
    assert_eq!(valued[0].value, 0.0);
    assert!(valued[0].color.b > valued[0].color.r, "zero value renders at the cool end");
    assert!(valued[0].distance_m > closest.distance_m, "the centroid sits behind the edge");

    // An exponential pass over the same cell stays cached-independent and
    // produces a positive score
    let exponential = ValuationParams {
        mode: DecayMode::Exponential,
        decay_k: 0.000001,
        max_distance_override: None,
    };
    let exp_valued = session.valuate(exponential).to_vec();
    assert_eq!(exp_valued.len(), 1);
    assert!(exp_valued[0].value > 0.0 && exp_valued[0].value < 1.0);

    // Hand-off shape for the rendering layer
    let collection = convert::valued_cells_to_geojson(&valued);
    assert_eq!(collection.features.len(), 1);
    let properties = collection.features[0].properties.as_ref().unwrap();
    assert_eq!(properties["value"], 0.0);
    assert!(properties["color"].as_str().unwrap().starts_with('#'));
}

#[test]
fn test_finer_grid_produces_eastward_gradient() {
    let mut session = GradientSession::new();
    session.set_boundary(&boundary());
    session.set_roads(roads());

    // ~25 km cells over a ~111 km square
    let cells = session.grid(25_000.0).len();
    assert!(cells >= 16, "expected a real grid, got {cells} cells");

    let params =
        ValuationParams { mode: DecayMode::Linear, decay_k: 0.0, max_distance_override: None };
    let valued = session.valuate(params).to_vec();
    assert_eq!(valued.len(), cells);

    for cell in &valued {
        assert!((0.0..=1.0).contains(&cell.value));
    }

    let best = valued.iter().max_by(|a, b| a.value.total_cmp(&b.value)).unwrap();
    let worst = valued.iter().min_by(|a, b| a.value.total_cmp(&b.value)).unwrap();
    let centroid_lon = |cell: &valgrid_core::models::ValuedCell| {
        valgrid_geo::metrics::centroid(&cell.cell).unwrap().x()
    };
    assert!(
        centroid_lon(best) > centroid_lon(worst),
        "cells nearer the eastern road must score higher"
    );
    assert_eq!(worst.value, 0.0, "the farthest cell anchors the scale at zero");
}
