//! Composition of the transform stages into a single drawing pipeline
use log::debug;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fit::{fit_to_canvas, size_fit, SizeFit};
use crate::geometry::{ensure_finite, CanvasSize, Margins};
use crate::projection::{project, Angles};
use crate::transform::Transform;

/// How a projected drawing is placed on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawingMode {
    /// Caller-supplied offset from the canvas center, then conversion to device coordinates
    Simple {
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        /// Optional scaling of the raw positions before projection
        #[serde(default)]
        size_fit: Option<SizeFit>,
    },
    /// Aspect-preserving fit inside the margins
    Fitted {
        #[serde(default)]
        margins: Margins,
    },
}

impl Default for DrawingMode {
    fn default() -> Self {
        DrawingMode::Fitted {
            margins: Margins::default(),
        }
    }
}

/// Projection, rotation and placement settings for one drawing
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    pub angles: Angles,
    #[serde(default)]
    pub canvas: CanvasSize,
    #[serde(default)]
    pub mode: DrawingMode,
}

impl Pipeline {
    pub fn new(angles: Angles, canvas: CanvasSize, mode: DrawingMode) -> Self {
        Self {
            angles,
            canvas,
            mode,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.angles.validate()?;
        self.canvas.validate()?;
        if let DrawingMode::Fitted { margins } = &self.mode {
            margins.usable(&self.canvas)?;
        }
        Ok(())
    }

    /// Turn 3D positions into 2D canvas points, in input order
    pub fn run(&self, positions: &[Point3<f64>]) -> Result<Vec<Point2<f64>>> {
        self.validate()?;
        ensure_finite(positions)?;
        let Angles { alpha, beta, delta } = self.angles;

        match &self.mode {
            DrawingMode::Simple { dx, dy, size_fit: fit } => {
                let scaled;
                let positions = match fit {
                    Some(fit) => {
                        scaled = size_fit(positions, &self.canvas, fit)?;
                        &scaled[..]
                    }
                    None => positions,
                };
                let projected = project(positions, alpha, beta);
                let rotated = Transform::rotate(&projected, delta);
                let translated = Transform::translate(&rotated, *dx, *dy);
                debug!(
                    "simple mode: {} points offset by ({}, {})",
                    translated.len(),
                    dx,
                    dy
                );
                Ok(Transform::to_device(&translated, &self.canvas))
            }
            DrawingMode::Fitted { margins } => {
                let projected = project(positions, alpha, beta);
                let rotated = Transform::rotate(&projected, delta);
                debug!("fitted mode: {} points", rotated.len());
                fit_to_canvas(&rotated, &self.canvas, margins)
            }
        }
    }
}
