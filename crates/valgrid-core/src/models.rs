//! Core data models for the valgrid pipeline.

pub mod geometry;
pub mod valuation;

pub use geometry::Geometry;
pub use valuation::{ClosestRoad, DecayMode, LonLatBounds, Rgb, ValuedCell};
