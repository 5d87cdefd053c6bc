//! Error type shared by all map operations.

use thiserror::Error;

/// Error returned by map construction and layer helpers.
#[derive(Debug, Error)]
pub enum MapError {
    /// Argument has a shape or value the operation does not accept.
    #[error("{0}")]
    InvalidArgument(String),

    /// Vector file extension is not one of the supported formats.
    #[error("unsupported vector file format: {0}")]
    UnsupportedFormat(String),

    /// Host map rejected the requested state.
    #[error("host map error: {0}")]
    Host(String),

    /// File system error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// GeoJSON parsing or conversion error.
    #[error(transparent)]
    GeoJson(#[from] geojson::Error),

    /// Shapefile reading error.
    #[error(transparent)]
    Shapefile(#[from] shapefile::Error),

    /// JSON (de)serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MapError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
