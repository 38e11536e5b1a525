//! Error types for the visplot library.
//!
//! This module defines a single error enum that covers all failure
//! conditions across validation, estimation, and rendering.

use thiserror::Error;

/// The main error type for visplot operations.
#[derive(Error, Debug)]
pub enum VisplotError {
    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Parameter-name count does not match the sample matrix column count
    #[error("Shape mismatch: {names} parameter names but {columns} value columns")]
    ShapeMismatch { names: usize, columns: usize },

    /// A parameter column cannot be rescaled because its min equals its max
    #[error("Constant column: parameter '{name}' has equal min and max, cannot normalize")]
    ConstantColumn { name: String },

    /// Density estimation errors
    #[error("Density estimation error: {message}")]
    Density { message: String },

    /// Chart rendering errors
    #[error("Render error: {message}")]
    Render { message: String },
}

/// Convenience type alias for Results with VisplotError
pub type Result<T> = std::result::Result<T, VisplotError>;

impl VisplotError {
    /// Wrap a plotters drawing-area or backend error.
    ///
    /// Backend error types are generic over the backend, so they are carried
    /// here as their rendered message.
    pub fn render<E: std::fmt::Display>(err: E) -> Self {
        VisplotError::Render {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VisplotError::ShapeMismatch {
            names: 3,
            columns: 4,
        };
        assert_eq!(
            err.to_string(),
            "Shape mismatch: 3 parameter names but 4 value columns"
        );

        let err = VisplotError::ConstantColumn {
            name: "alpha".to_string(),
        };
        assert!(err.to_string().contains("alpha"));

        let err = VisplotError::render("backend closed");
        assert_eq!(err.to_string(), "Render error: backend closed");
    }
}
