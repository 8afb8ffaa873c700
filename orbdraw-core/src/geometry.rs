//! Canvas and point-set primitives for 2D drawings
use nalgebra::{Point, Point2};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Canvas dimensions in device units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::InvalidCanvas(format!(
                "width must be positive, got {}",
                self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::InvalidCanvas(format!(
                "height must be positive, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Reserved border space on each canvas side, in device units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub right: f64,
    #[serde(default)]
    pub bottom: f64,
}

impl Margins {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Width and height left over once the margins are removed from `canvas`
    pub fn usable(&self, canvas: &CanvasSize) -> Result<(f64, f64)> {
        let sides = [self.left, self.top, self.right, self.bottom];
        if sides.iter().any(|m| !(m.is_finite() && *m >= 0.0)) {
            return Err(Error::InvalidCanvas(format!(
                "margins must be non-negative, got {:?}",
                sides
            )));
        }

        let width = canvas.width - self.left - self.right;
        let height = canvas.height - self.top - self.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidCanvas(format!(
                "margins leave no drawable area on a {}x{} canvas",
                canvas.width, canvas.height
            )));
        }
        Ok((width, height))
    }
}

/// Fail on the first point holding a NaN or infinite coordinate
pub fn ensure_finite<const D: usize>(points: &[Point<f64, D>]) -> Result<()> {
    match points
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        Some(index) => Err(Error::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

/// Axis-aligned bounds of a 2D point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl BoundingBox {
    /// Bounds of `points`, or `None` when the slice is empty
    pub fn from_points(points: &[Point2<f64>]) -> Option<Self> {
        let first = points.first()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in &points[1..] {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
