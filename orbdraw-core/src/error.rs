//! Error types for orbdraw

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type for orbdraw operations
pub type Result<T> = std::result::Result<T, Error>;

/// Axis named by a degenerate-geometry error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    /// Every axis of a 3D point set
    All,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::All => write!(f, "every"),
        }
    }
}

/// Errors raised while transforming or emitting a drawing
#[derive(Debug, Error)]
pub enum Error {
    /// Zero extent along an axis used as a scale divisor
    #[error("degenerate geometry: {axis} extent is zero across {points} points")]
    DegenerateGeometry { axis: Axis, points: usize },

    /// Too few points for the requested operation
    #[error("insufficient data: {found} points supplied, at least {required} required")]
    InsufficientData { found: usize, required: usize },

    /// Canvas size or margins outside their valid range
    #[error("invalid canvas: {0}")]
    InvalidCanvas(String),

    /// Projection or rotation angles outside their valid range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// NaN or infinite coordinate in a point sequence
    #[error("non-finite coordinate in point {index}")]
    NonFiniteCoordinate { index: usize },

    /// Malformed line in a positions file
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Writer or reader failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DegenerateGeometry {
            axis: Axis::Y,
            points: 4,
        };
        assert_eq!(
            err.to_string(),
            "degenerate geometry: y extent is zero across 4 points"
        );
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = Error::InsufficientData {
            found: 1,
            required: 2,
        };
        assert!(err.to_string().contains("1 points supplied"));
    }

    #[test]
    fn test_parameter_errors_display() {
        let err = Error::InvalidParameter("alpha must be finite".into());
        assert_eq!(err.to_string(), "invalid parameter: alpha must be finite");
        let err = Error::NonFiniteCoordinate { index: 12 };
        assert_eq!(err.to_string(), "non-finite coordinate in point 12");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
