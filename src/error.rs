//! Error types for calendar rendering
//!
//! This module defines the error type shared by the layout engine, the style
//! loader and the drawing surfaces.

use thiserror::Error;

/// Custom error type for calendar operations
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Style error: {0}")]
    StyleParse(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawing surface error: {0}")]
    Surface(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Raster error: {0}")]
    Raster(String),
}

/// Result type alias for calendar operations
pub type CalendarResult<T> = Result<T, CalendarError>;

#[cfg(feature = "python")]
impl From<CalendarError> for pyo3::PyErr {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::Io(e) => {
                pyo3::PyErr::new::<pyo3::exceptions::PyIOError, _>(e.to_string())
            }
            other => pyo3::PyErr::new::<pyo3::exceptions::PyValueError, _>(other.to_string()),
        }
    }
}
