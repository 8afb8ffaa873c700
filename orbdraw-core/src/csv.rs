//! Plain `x, y` coordinate list output
use nalgebra::Point2;
use std::io::Write;

use crate::error::Result;
use crate::sink::SegmentSink;

/// Writes one `"{x}, {y}"` line per point.
///
/// Floats use the shortest round-trip form and always carry a decimal point.
pub struct CsvWriter<W: Write> {
    writer: W,
    started: bool,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            started: false,
        }
    }

    pub fn write_point(&mut self, point: &Point2<f64>) -> Result<()> {
        writeln!(self.writer, "{:?}, {:?}", point.x, point.y)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SegmentSink for CsvWriter<W> {
    fn draw_segment(&mut self, from: &Point2<f64>, to: &Point2<f64>) -> Result<()> {
        if !self.started {
            self.write_point(from)?;
            self.started = true;
        }
        self.write_point(to)
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write every point of `points` to `writer`
pub fn write_csv<W: Write>(points: &[Point2<f64>], writer: W) -> Result<()> {
    let mut csv = CsvWriter::new(writer);
    for p in points {
        csv.write_point(p)?;
    }
    csv.writer.flush()?;
    Ok(())
}
