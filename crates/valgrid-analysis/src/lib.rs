//! Valgrid Analysis - nearest-road search, grid generation, and valuation
//!
//! The computational stages over a normalized boundary: find the closest
//! road, tile and clip the boundary into cells, and score each cell by
//! distance decay. [`pipeline::GradientSession`] strings the stages together
//! with the cache-and-invalidate behavior the interactive flow expects.

pub mod grid;
pub mod nearest;
pub mod pipeline;
pub mod ramp;
pub mod valuation;
