//! Planar projection of 3D positions
use nalgebra::{Matrix2x3, Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Orientation of the projection plane and of the drawing within it (radians)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Angles {
    /// Tilt of the projection plane from the xy-plane
    #[serde(default)]
    pub alpha: f64,
    /// Rotation of the projection plane about the z-axis
    #[serde(default)]
    pub beta: f64,
    /// Rotation applied after projection
    #[serde(default)]
    pub delta: f64,
}

impl Angles {
    pub fn new(alpha: f64, beta: f64, delta: f64) -> Self {
        Self { alpha, beta, delta }
    }

    pub fn validate(&self) -> Result<()> {
        if [self.alpha, self.beta, self.delta]
            .iter()
            .all(|a| a.is_finite())
        {
            Ok(())
        } else {
            Err(Error::InvalidParameter(format!(
                "angles must be finite, got {:?}",
                self
            )))
        }
    }
}

/// Linear map from 3D space onto the plane tilted by `alpha` and turned by `beta`
#[rustfmt::skip]
pub fn projection_matrix(alpha: f64, beta: f64) -> Matrix2x3<f64> {
    let (sa, ca) = alpha.sin_cos();
    let (sb, cb) = beta.sin_cos();
    Matrix2x3::new(
        cb, -sb, 0.0,
        -sb * sa, -cb * sa, ca,
    )
}

/// Project every point onto the plane, keeping order
pub fn project(points: &[Point3<f64>], alpha: f64, beta: f64) -> Vec<Point2<f64>> {
    let m = projection_matrix(alpha, beta);
    points.iter().map(|p| Point2::from(m * p.coords)).collect()
}
