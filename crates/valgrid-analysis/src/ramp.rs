//! Fixed diverging color ramp for cell values.

use valgrid_core::models::Rgb;

/// Map a cell value onto the diverging ramp: `1.0` (closest, highest) renders
/// at the warm red end, `0.0` (farthest, lowest) at the cool blue end.
///
/// Out-of-range values clamp to the ramp ends, so degenerate decay
/// parameters still produce a drawable color.
pub fn value_color(value: f64) -> Rgb {
    let t = 1.0 - value;
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    let color = colorous::RED_YELLOW_BLUE.eval_continuous(t);
    Rgb { r: color.r, g: color.g, b: color.b }
}
