//! GeoJSON conversions at the pipeline boundary.
//!
//! Geocoding responses (boundary candidates) and road-service responses
//! (feature collections of ways) arrive as already-parsed GeoJSON; everything
//! past this module works on `geo` types only. The reverse direction exists
//! for handing valuation results back to the rendering layer.

use geo::{
    Coord, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use geojson::{Feature, FeatureCollection, JsonObject, Value};

use crate::error::{Result, ValgridError};
use crate::models::{Geometry, ValuedCell};

/// Convert a parsed GeoJSON geometry into the canonical enum.
///
/// Malformed coordinate arrays produce a typed error. Kind filtering
/// (Polygon/MultiPolygon only for boundaries) is normalization's job, not
/// this function's.
pub fn geometry_from_geojson(geometry: &geojson::Geometry) -> Result<Geometry> {
    match &geometry.value {
        Value::Point(position) => Ok(Geometry::Point(Point::from(coord(position)?))),
        Value::MultiPoint(positions) => {
            let points: Vec<Point> = positions
                .iter()
                .map(|position| coord(position).map(Point::from))
                .collect::<Result<_>>()?;
            Ok(Geometry::MultiPoint(MultiPoint::new(points)))
        }
        Value::LineString(positions) => Ok(Geometry::LineString(line_string(positions)?)),
        Value::MultiLineString(lines) => {
            let lines: Vec<LineString> =
                lines.iter().map(|positions| line_string(positions)).collect::<Result<_>>()?;
            Ok(Geometry::MultiLineString(MultiLineString::new(lines)))
        }
        Value::Polygon(rings) => Ok(Geometry::Polygon(polygon(rings)?)),
        Value::MultiPolygon(polygons) => {
            let parts: Vec<Polygon> =
                polygons.iter().map(|rings| polygon(rings)).collect::<Result<_>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::new(parts)))
        }
        Value::GeometryCollection(_) => Err(ValgridError::UnsupportedGeometry {
            kind: "GeometryCollection".to_string(),
        }),
    }
}

/// Convert the canonical enum back to a GeoJSON geometry.
pub fn geometry_to_geojson(geometry: &Geometry) -> geojson::Geometry {
    let value = match geometry {
        Geometry::Point(point) => Value::Point(position(point.0)),
        Geometry::MultiPoint(points) => {
            Value::MultiPoint(points.iter().map(|point| position(point.0)).collect())
        }
        Geometry::LineString(line) => Value::LineString(positions(line)),
        Geometry::MultiLineString(lines) => {
            Value::MultiLineString(lines.iter().map(positions).collect())
        }
        Geometry::Polygon(polygon) => Value::Polygon(rings(polygon)),
        Geometry::MultiPolygon(parts) => {
            Value::MultiPolygon(parts.iter().map(rings).collect())
        }
    };
    geojson::Geometry::new(value)
}

/// Extract road linestrings from a fetched feature collection.
///
/// MultiLineString features fan out into one road per part. Features with no
/// geometry or with non-line geometry are ignored: the road service also
/// returns nodes and polygonal areas for some category filters.
pub fn road_lines(collection: &FeatureCollection) -> Vec<LineString> {
    let mut roads = Vec::new();
    for feature in &collection.features {
        let Some(geometry) = &feature.geometry else {
            continue;
        };
        match geometry_from_geojson(geometry) {
            Ok(Geometry::LineString(line)) => roads.push(line),
            Ok(Geometry::MultiLineString(lines)) => roads.extend(lines.0),
            Ok(_) => {}
            Err(err) => tracing::debug!("skipping unparsable road feature: {err}"),
        }
    }
    roads
}

/// Project a valuation result into the GeoJSON form the rendering layer
/// consumes: one polygon feature per cell with `distance_m`, `value`, and a
/// hex `color` property.
pub fn valued_cells_to_geojson(cells: &[ValuedCell]) -> FeatureCollection {
    let features = cells
        .iter()
        .map(|valued| {
            let mut properties = JsonObject::new();
            properties.insert("distance_m".to_string(), valued.distance_m.into());
            properties.insert("value".to_string(), valued.value.into());
            properties.insert("color".to_string(), valued.color.to_hex().into());
            Feature {
                bbox: None,
                geometry: Some(geometry_to_geojson(&Geometry::Polygon(valued.cell.clone()))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    FeatureCollection { bbox: None, features, foreign_members: None }
}

fn coord(position: &[f64]) -> Result<Coord> {
    if position.len() < 2 {
        return Err(ValgridError::MalformedGeoJson {
            reason: format!("position has {} ordinates, expected at least 2", position.len()),
        });
    }
    Ok(Coord { x: position[0], y: position[1] })
}

fn line_string(positions: &[Vec<f64>]) -> Result<LineString> {
    let coords: Vec<Coord> = positions.iter().map(|p| coord(p)).collect::<Result<_>>()?;
    Ok(LineString::new(coords))
}

fn polygon(raw_rings: &[Vec<Vec<f64>>]) -> Result<Polygon> {
    let mut converted: Vec<LineString> =
        raw_rings.iter().map(|ring| line_string(ring)).collect::<Result<_>>()?;
    if converted.is_empty() {
        return Err(ValgridError::MalformedGeoJson { reason: "polygon has no rings".to_string() });
    }
    let exterior = converted.remove(0);
    Ok(Polygon::new(exterior, converted))
}

fn position(coord: Coord) -> Vec<f64> {
    vec![coord.x, coord.y]
}

fn positions(line: &LineString) -> Vec<Vec<f64>> {
    line.coords().map(|c| position(*c)).collect()
}

fn rings(polygon: &Polygon) -> Vec<Vec<Vec<f64>>> {
    let mut rings = vec![positions(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(positions));
    rings
}
