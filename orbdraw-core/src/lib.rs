//! orbdraw core library - stateless projection and canvas-fitting of orbit drawings
//!
//! Turns a time-ordered sequence of 3D positions into 2D canvas points through a fixed
//! pipeline (projection, in-plane rotation, placement) and hands the result to a
//! [`SegmentSink`] such as the CSV or SVG writers.

pub mod csv;
pub mod error;
pub mod fit;
pub mod geometry;
pub mod input;
pub mod pipeline;
pub mod projection;
pub mod sink;
pub mod svg;
pub mod transform;

// Re-export commonly used types
pub use csv::{write_csv, CsvWriter};
pub use error::{Axis, Error, Result};
pub use fit::{fit_to_canvas, size_fit, SizeFit};
pub use geometry::{BoundingBox, CanvasSize, Margins};
pub use input::{parse_positions, read_positions};
pub use pipeline::{DrawingMode, Pipeline};
pub use projection::{project, Angles};
pub use sink::{draw_path, SegmentSink};
pub use svg::SvgWriter;
pub use transform::Transform;
