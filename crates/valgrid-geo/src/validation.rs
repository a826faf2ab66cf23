//! Structural checks for boundary and road inputs.
//!
//! The pipeline prefers "no result" over faults, so these checks are what
//! the session layer consults to decide whether an input is usable at all.
//! Ring closure is not checked here: `geo::Polygon` closes its rings on
//! construction, so closure is the backend's invariant, not ours.

use geo::{LineString, Polygon};

/// Structural defects found in one geometry.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub problems: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }

    fn flag(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }
}

/// Check a boundary polygon: an outer ring of at least 4 finite
/// coordinates; interior rings, when present, held to the same rules.
pub fn check_boundary(polygon: &Polygon) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_ring("outer ring", polygon.exterior(), &mut report);
    for (i, interior) in polygon.interiors().iter().enumerate() {
        check_ring(&format!("hole {i}"), interior, &mut report);
    }
    report
}

/// Check a road line: at least 2 finite coordinates; open and closed lines
/// are both acceptable.
pub fn check_road(line: &LineString) -> ValidationReport {
    let mut report = ValidationReport::default();
    if line.0.len() < 2 {
        report.flag(format!("road has {} coordinates, need at least 2", line.0.len()));
    }
    check_finite("road", line, &mut report);
    report
}

fn check_ring(label: &str, ring: &LineString, report: &mut ValidationReport) {
    if ring.0.len() < 4 {
        report.flag(format!(
            "{label} has {} coordinates, a closed ring needs at least 4",
            ring.0.len()
        ));
        return;
    }
    check_finite(label, ring, report);
}

fn check_finite(label: &str, line: &LineString, report: &mut ValidationReport) {
    for (i, coord) in line.0.iter().enumerate() {
        if !coord.x.is_finite() || !coord.y.is_finite() {
            report.flag(format!("{label} coordinate {i} is not finite"));
        }
    }
}
