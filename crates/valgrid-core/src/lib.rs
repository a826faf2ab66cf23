//! Valgrid Core - canonical models, configuration, and GeoJSON conversions
//!
//! This crate holds the types shared by the valgrid workspace: the canonical
//! geometry enum bridging GeoJSON and the `geo` crate, the result models the
//! analysis stages produce, the error taxonomy, and the layered analysis
//! configuration.

pub mod config;
pub mod convert;
pub mod error;
pub mod models;

pub use error::{Result, ValgridError};
