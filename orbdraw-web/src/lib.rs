//! orbdraw web - draws orbit paths onto an HTML canvas from WASM
//!
//! Positions cross the JS boundary as a flat `[x0, y0, z0, x1, y1, z1, ...]` array.

use nalgebra::{Point2, Point3};
use orbdraw_core::{
    draw_path, Angles, CanvasSize, DrawingMode, Error, Margins, Pipeline, SegmentSink,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Group a flat coordinate array into 3D points
pub fn positions_from_flat(flat: &[f64]) -> Result<Vec<Point3<f64>>, Error> {
    if flat.len() % 3 != 0 {
        return Err(Error::Parse {
            line: flat.len() / 3 + 1,
            message: format!("{} values do not form whole x, y, z triples", flat.len()),
        });
    }
    Ok(flat
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

fn to_js(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Segment sink that strokes a single path on a 2D canvas context
struct CanvasSink<'a> {
    context: &'a CanvasRenderingContext2d,
    started: bool,
}

impl SegmentSink for CanvasSink<'_> {
    fn draw_segment(&mut self, from: &Point2<f64>, to: &Point2<f64>) -> orbdraw_core::Result<()> {
        if !self.started {
            self.context.begin_path();
            self.context.move_to(from.x, from.y);
            self.started = true;
        }
        self.context.line_to(to.x, to.y);
        Ok(())
    }

    fn finish(&mut self) -> orbdraw_core::Result<()> {
        self.context.stroke();
        Ok(())
    }
}

#[wasm_bindgen]
pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    angles: Angles,
    margin: f64,
}

#[wasm_bindgen]
impl WebRenderer {
    /// Attach to the `<canvas>` element with id `canvas_id`
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id `{}`", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(WebRenderer {
            canvas,
            context,
            angles: Angles::default(),
            margin: 0.0,
        })
    }

    /// Set the projection and rotation angles (radians)
    pub fn set_angles(&mut self, alpha: f64, beta: f64, delta: f64) {
        self.angles = Angles::new(alpha, beta, delta);
    }

    /// Uniform margin kept clear on every canvas side
    pub fn set_margin(&mut self, margin: f64) {
        self.margin = margin;
    }

    /// Clear the canvas and draw the fitted path through `positions`
    pub fn render(&self, positions: &[f64]) -> Result<(), JsValue> {
        let positions = positions_from_flat(positions).map_err(to_js)?;
        let canvas = CanvasSize::new(self.canvas.width() as f64, self.canvas.height() as f64);
        let pipeline = Pipeline::new(
            self.angles,
            canvas,
            DrawingMode::Fitted {
                margins: Margins::uniform(self.margin),
            },
        );
        let points = pipeline.run(&positions).map_err(to_js)?;

        self.context.clear_rect(0.0, 0.0, canvas.width, canvas.height);
        let mut sink = CanvasSink {
            context: &self.context,
            started: false,
        };
        draw_path(&points, &mut sink).map_err(to_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_from_flat() {
        let positions = positions_from_flat(&[1.0, 2.0, 3.0, -4.0, -5.0, -6.0]).unwrap();
        assert_eq!(
            positions,
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, -5.0, -6.0)]
        );
    }

    #[test]
    fn test_partial_triple_rejected() {
        assert!(matches!(
            positions_from_flat(&[1.0, 2.0, 3.0, 4.0]),
            Err(Error::Parse { line: 2, .. })
        ));
    }
}
