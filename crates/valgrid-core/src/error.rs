//! Error types for valgrid

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValgridError {
    // Geometry ingestion errors
    #[error("Unsupported geometry kind: {kind}")]
    UnsupportedGeometry { kind: String },

    #[error("Malformed GeoJSON: {reason}")]
    MalformedGeoJson { reason: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ValgridError>;
