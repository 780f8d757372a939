//! Error handling for KRLKit
//!
//! Provides the error taxonomy for the conversion pipeline:
//! - Image loading failures (unreadable or corrupt input)
//! - Parameter validation failures (surfaced before processing starts)
//! - Empty-input failures (no contours survive filtering)
//! - Degenerate-contour failures (a single contour unusable for synthesis)
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Errors that can occur during image-to-motion-program conversion.
///
/// `ImageLoad`, `InvalidParameter` and `EmptyInput` are fatal to the
/// request. `DegenerateContour` is reported per contour; the batch
/// continues without the offending contour.
#[derive(Error, Debug)]
pub enum PlotError {
    /// The input image could not be read or decoded.
    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    /// A configuration value is out of range or mismatched.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An operation that requires at least one contour received none.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// A single contour is unusable for motion synthesis.
    #[error("Contour {index} is degenerate: {reason}")]
    DegenerateContour {
        /// Index of the offending contour in its set.
        index: usize,
        /// Why the contour cannot be synthesized.
        reason: String,
    },

    /// The motion program text could not be parsed.
    #[error("KRL parse error: {0}")]
    KrlParse(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PlotError {
    /// Convenience constructor for parameter validation failures.
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PlotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_error_display() {
        let err = PlotError::ImageLoad("truncated PNG".to_string());
        assert_eq!(err.to_string(), "Failed to load image: truncated PNG");

        let err = PlotError::invalid_parameter("block_size", "must be odd, got 4");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'block_size': must be odd, got 4"
        );

        let err = PlotError::EmptyInput("no contours survived filtering".to_string());
        assert_eq!(
            err.to_string(),
            "Empty input: no contours survived filtering"
        );
    }

    #[test]
    fn test_degenerate_contour_display() {
        let err = PlotError::DegenerateContour {
            index: 3,
            reason: "fewer than 2 points".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Contour 3 is degenerate: fewer than 2 points"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PlotError = io_err.into();
        assert!(matches!(err, PlotError::Io(_)));
    }
}
