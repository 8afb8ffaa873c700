//! In-plane transforms and frame conversion for 2D drawings
use nalgebra::{Point2, Rotation2, Vector2};

use crate::geometry::CanvasSize;

/// Stateless 2D transform stages. Each returns a new sequence in input order.
pub struct Transform;

impl Transform {
    /// Rotate about the origin by `delta` radians, clockwise in mathematical orientation
    pub fn rotate(points: &[Point2<f64>], delta: f64) -> Vec<Point2<f64>> {
        let rotation = Rotation2::new(-delta);
        points.iter().map(|p| rotation.transform_point(p)).collect()
    }

    /// Offset every point by `(dx, dy)`
    pub fn translate(points: &[Point2<f64>], dx: f64, dy: f64) -> Vec<Point2<f64>> {
        let offset = Vector2::new(dx, dy);
        points.iter().map(|p| p + offset).collect()
    }

    /// Centered Y-up coordinates to top-left Y-down device coordinates
    pub fn to_device(points: &[Point2<f64>], canvas: &CanvasSize) -> Vec<Point2<f64>> {
        let (half_w, half_h) = (canvas.width / 2.0, canvas.height / 2.0);
        points
            .iter()
            .map(|p| Point2::new(p.x + half_w, -p.y + half_h))
            .collect()
    }

    /// Inverse of [`Transform::to_device`]
    pub fn to_math(points: &[Point2<f64>], canvas: &CanvasSize) -> Vec<Point2<f64>> {
        let (half_w, half_h) = (canvas.width / 2.0, canvas.height / 2.0);
        points
            .iter()
            .map(|p| Point2::new(p.x - half_w, -(p.y - half_h)))
            .collect()
    }
}
