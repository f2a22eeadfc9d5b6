//! Error types for the inspector

use thiserror::Error;

/// Fatal errors for an inspection run. Per-feature problems (unsupported
/// kinds, malformed payloads) are reported as skip records instead, so one
/// bad feature never aborts the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GeoJSON parse error: {0}")]
    Geojson(#[from] geojson::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input file is not a FeatureCollection")]
    NotAFeatureCollection,

    #[error("no coordinates to compute bounds from")]
    EmptyInput,

    #[error("degenerate region: {0}")]
    DegenerateRegion(String),

    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias for inspector operations
pub type Result<T> = std::result::Result<T, Error>;
