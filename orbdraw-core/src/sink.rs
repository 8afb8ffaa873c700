//! Output side of the pipeline: anything that can draw line segments
use nalgebra::Point2;

use crate::error::{Error, Result};

/// Minimum number of points that makes a drawable path
pub const MIN_PATH_POINTS: usize = 2;

/// Consumer of line segments in device coordinates
pub trait SegmentSink {
    /// Draw one segment. Consecutive calls share endpoints.
    fn draw_segment(&mut self, from: &Point2<f64>, to: &Point2<f64>) -> Result<()>;

    /// Flush or redraw once every segment has been drawn
    fn finish(&mut self) -> Result<()>;
}

/// Feed the N-1 segments joining consecutive `points` to `sink`, then finish it.
///
/// Nothing is drawn when fewer than two points are supplied.
pub fn draw_path<S: SegmentSink + ?Sized>(points: &[Point2<f64>], sink: &mut S) -> Result<()> {
    if points.len() < MIN_PATH_POINTS {
        return Err(Error::InsufficientData {
            found: points.len(),
            required: MIN_PATH_POINTS,
        });
    }

    for pair in points.windows(2) {
        sink.draw_segment(&pair[0], &pair[1])?;
    }
    sink.finish()
}
