//! Scale-to-fit for projected drawings
//!
//! [`fit_to_canvas`] fills the canvas area inside the margins with a 2D point set while
//! keeping its proportions. [`size_fit`] is the simpler pre-projection scaling used by the
//! simple drawing mode.
use log::debug;
use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::error::{Axis, Error, Result};
use crate::geometry::{ensure_finite, BoundingBox, CanvasSize, Margins};

/// Uniform scaling of raw 3D positions against the canvas height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeFit {
    /// Only `top` and `bottom` are used
    #[serde(default)]
    pub margins: Margins,
    /// Fraction of the usable height the drawing spans
    #[serde(default = "default_factor")]
    pub factor: f64,
}

fn default_factor() -> f64 {
    1.0
}

impl Default for SizeFit {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            factor: default_factor(),
        }
    }
}

/// Scale 3D positions so that a drawing centered on the origin spans the usable height.
///
/// The drawing is assumed to be about twice its largest absolute coordinate across.
pub fn size_fit(
    points: &[Point3<f64>],
    canvas: &CanvasSize,
    fit: &SizeFit,
) -> Result<Vec<Point3<f64>>> {
    let usable_height = canvas.height - fit.margins.top - fit.margins.bottom;
    if usable_height <= 0.0 {
        return Err(Error::InvalidCanvas(format!(
            "margins leave no drawable height on a {}x{} canvas",
            canvas.width, canvas.height
        )));
    }

    ensure_finite(points)?;
    let largest = points
        .iter()
        .flat_map(|p| p.coords.iter())
        .fold(0.0_f64, |acc, c| acc.max(c.abs()));
    if largest == 0.0 {
        return Err(Error::DegenerateGeometry {
            axis: Axis::All,
            points: points.len(),
        });
    }

    let scale = usable_height / (2.0 * largest) * fit.factor;
    debug!("size fit: largest coordinate {}, scale {}", largest, scale);
    Ok(points.iter().map(|p| p * scale).collect())
}

/// Rescale and reorient `points` to fill `canvas` inside `margins`, preserving aspect ratio.
///
/// A drawing whose orientation disagrees with a non-square canvas has its x and y
/// coordinates transposed first. Output stays in mathematical orientation with the x axis
/// offset by the left margin and the y axis by the top margin.
pub fn fit_to_canvas(
    points: &[Point2<f64>],
    canvas: &CanvasSize,
    margins: &Margins,
) -> Result<Vec<Point2<f64>>> {
    canvas.validate()?;
    let (usable_w, usable_h) = margins.usable(canvas)?;
    ensure_finite(points)?;

    let bounds = BoundingBox::from_points(points).ok_or(Error::InsufficientData {
        found: 0,
        required: 1,
    })?;
    let (xdim, ydim) = (bounds.width(), bounds.height());

    let swap = (canvas.is_portrait() && xdim > ydim) || (canvas.is_landscape() && ydim > xdim);
    let (points, bounds) = if swap {
        debug!(
            "drawing is {}x{} on a {}x{} canvas, transposing axes",
            xdim, ydim, canvas.width, canvas.height
        );
        let swapped: Vec<_> = points.iter().map(|p| Point2::new(p.y, p.x)).collect();
        let bounds = BoundingBox {
            min: Point2::new(bounds.min.y, bounds.min.x),
            max: Point2::new(bounds.max.y, bounds.max.x),
        };
        (swapped, bounds)
    } else {
        (points.to_vec(), bounds)
    };

    let (width, height) = (bounds.width(), bounds.height());
    if width == 0.0 {
        return Err(Error::DegenerateGeometry {
            axis: if swap { Axis::Y } else { Axis::X },
            points: points.len(),
        });
    }
    if height == 0.0 {
        return Err(Error::DegenerateGeometry {
            axis: if swap { Axis::X } else { Axis::Y },
            points: points.len(),
        });
    }

    let x_scale = usable_w / width;
    let y_scale = usable_h / height;
    let x_limited = x_scale <= y_scale;
    let scale = if x_limited { x_scale } else { y_scale };
    debug!(
        "fit scale {} ({}-limited), x_scale {}, y_scale {}",
        scale,
        if x_limited { "x" } else { "y" },
        x_scale,
        y_scale
    );

    let (x_offset, y_offset) = if x_limited {
        (margins.left, margins.top + (usable_h - height * scale) / 2.0)
    } else {
        (margins.left + (usable_w - width * scale) / 2.0, margins.top)
    };

    Ok(points
        .iter()
        .map(|p| {
            Point2::new(
                x_offset + (p.x - bounds.min.x) * scale,
                y_offset + (p.y - bounds.min.y) * scale,
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ellipse(a: f64, b: f64, n: usize) -> Vec<Point2<f64>> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64 * std::f64::consts::TAU;
                Point2::new(a * t.cos() + 3.0, b * t.sin() - 1.0)
            })
            .collect()
    }

    fn assert_within(points: &[Point2<f64>], canvas: &CanvasSize, margins: &Margins) {
        let eps = 1e-9;
        for p in points {
            assert!(p.x >= margins.left - eps && p.x <= canvas.width - margins.right + eps);
            assert!(p.y >= margins.top - eps && p.y <= canvas.height - margins.bottom + eps);
        }
    }

    #[test]
    fn test_square_canvas_centers_short_axis() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 5.0)];
        let canvas = CanvasSize::new(100.0, 100.0);
        let out = fit_to_canvas(&points, &canvas, &Margins::default()).unwrap();
        let bounds = BoundingBox::from_points(&out).unwrap();
        assert!((bounds.min.x - 0.0).abs() < 1e-9);
        assert!((bounds.max.x - 100.0).abs() < 1e-9);
        assert!((bounds.min.y - 25.0).abs() < 1e-9);
        assert!((bounds.max.y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_portrait_canvas_transposes_wide_drawing() {
        let points = ellipse(40.0, 10.0, 64);
        let canvas = CanvasSize::new(300.0, 600.0);
        let margins = Margins::new(10.0, 20.0, 30.0, 40.0);
        let out = fit_to_canvas(&points, &canvas, &margins).unwrap();

        let bounds = BoundingBox::from_points(&out).unwrap();
        assert!(bounds.height() > bounds.width());
        assert_within(&out, &canvas, &margins);
    }

    #[test]
    fn test_landscape_canvas_transposes_tall_drawing() {
        let points = ellipse(2.0, 9.0, 32);
        let canvas = CanvasSize::new(800.0, 200.0);
        let out = fit_to_canvas(&points, &canvas, &Margins::uniform(5.0)).unwrap();
        let bounds = BoundingBox::from_points(&out).unwrap();
        assert!(bounds.width() > bounds.height());
    }

    #[test]
    fn test_output_within_margins() {
        let canvas = CanvasSize::new(640.0, 480.0);
        let margins = Margins::new(12.0, 30.0, 8.0, 50.0);
        for (a, b) in [(1.0, 1.0), (5.0, 1.0), (1.0, 5.0), (1e5, 3e4)] {
            let out = fit_to_canvas(&ellipse(a, b, 50), &canvas, &margins).unwrap();
            assert_within(&out, &canvas, &margins);
        }
    }

    #[test]
    fn test_aspect_ratio_preserved() {
        let points = ellipse(7.0, 3.0, 100);
        let before = BoundingBox::from_points(&points).unwrap();
        let canvas = CanvasSize::new(1000.0, 400.0);
        let out = fit_to_canvas(&points, &canvas, &Margins::uniform(20.0)).unwrap();
        let after = BoundingBox::from_points(&out).unwrap();
        let ratio_in = before.width() / before.height();
        let ratio_out = after.width() / after.height();
        assert!((ratio_in - ratio_out).abs() < 1e-9);
    }

    #[test]
    fn test_aspect_ratio_preserved_when_transposed() {
        let points = ellipse(40.0, 10.0, 64);
        let before = BoundingBox::from_points(&points).unwrap();
        let canvas = CanvasSize::new(300.0, 600.0);
        let margins = Margins::new(10.0, 20.0, 30.0, 40.0);
        let out = fit_to_canvas(&points, &canvas, &margins).unwrap();
        let after = BoundingBox::from_points(&out).unwrap();
        // the wide drawing is transposed onto the portrait canvas
        let ratio_in = before.height() / before.width();
        let ratio_out = after.width() / after.height();
        assert!((ratio_in - ratio_out).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_points_rejected() {
        let mut points = ellipse(3.0, 2.0, 16);
        points[5] = Point2::new(f64::NAN, 1.0);
        let result = fit_to_canvas(&points, &CanvasSize::default(), &Margins::default());
        assert!(matches!(result, Err(Error::NonFiniteCoordinate { index: 5 })));

        points[5] = Point2::new(0.0, f64::INFINITY);
        let result = fit_to_canvas(&points, &CanvasSize::default(), &Margins::default());
        assert!(matches!(result, Err(Error::NonFiniteCoordinate { index: 5 })));
    }

    #[test]
    fn test_identical_points_rejected() {
        let points = vec![Point2::new(2.0, 2.0); 5];
        let result = fit_to_canvas(&points, &CanvasSize::default(), &Margins::default());
        assert!(matches!(
            result,
            Err(Error::DegenerateGeometry { points: 5, .. })
        ));
    }

    #[test]
    fn test_axis_aligned_line_rejected() {
        let points = vec![Point2::new(0.0, 1.0), Point2::new(4.0, 1.0), Point2::new(9.0, 1.0)];
        let result = fit_to_canvas(&points, &CanvasSize::new(100.0, 100.0), &Margins::default());
        assert!(matches!(
            result,
            Err(Error::DegenerateGeometry { axis: Axis::Y, .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = fit_to_canvas(&[], &CanvasSize::default(), &Margins::default());
        assert!(matches!(result, Err(Error::InsufficientData { found: 0, .. })));
    }

    #[test]
    fn test_size_fit_scale() {
        let points = vec![Point3::new(100.0, -50.0, 0.0), Point3::new(0.0, 25.0, -200.0)];
        let canvas = CanvasSize::new(500.0, 420.0);
        let fit = SizeFit {
            margins: Margins::new(0.0, 10.0, 0.0, 10.0),
            factor: 0.5,
        };
        let out = size_fit(&points, &canvas, &fit).unwrap();
        // 400 / (2 * 200) * 0.5
        let scale = 0.5;
        assert!((out[0] - points[0] * scale).norm() < 1e-12);
        assert!((out[1] - points[1] * scale).norm() < 1e-12);
    }

    #[test]
    fn test_size_fit_nan_input() {
        let points = vec![Point3::new(1.0, 2.0, 3.0), Point3::new(0.0, f64::NAN, 0.0)];
        let result = size_fit(&points, &CanvasSize::default(), &SizeFit::default());
        assert!(matches!(result, Err(Error::NonFiniteCoordinate { index: 1 })));
    }

    #[test]
    fn test_size_fit_zero_input() {
        let result = size_fit(&[Point3::origin(); 3], &CanvasSize::default(), &SizeFit::default());
        assert!(matches!(
            result,
            Err(Error::DegenerateGeometry { axis: Axis::All, points: 3 })
        ));
    }
}
