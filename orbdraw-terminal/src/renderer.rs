//! Line rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Point2;
use orbdraw_core::CanvasSize;
use std::io::Write;

const BLANK: char = ' ';
const TRAIL: char = '*';
const VERTEX: char = 'o';

/// Character-grid renderer that maps device-coordinate segments onto terminal cells
pub struct LineRenderer {
    width: usize,
    height: usize,
    canvas: CanvasSize,
    char_buffer: Vec<char>,
}

impl LineRenderer {
    pub fn new(width: usize, height: usize, canvas: CanvasSize) -> Self {
        Self {
            width,
            height,
            canvas,
            char_buffer: vec![BLANK; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(BLANK);
    }

    /// Resize the cell grid, discarding its contents
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![BLANK; width * height];
    }

    /// Fractional cell coordinates of a device point
    fn to_cell(&self, p: &Point2<f64>) -> (f64, f64) {
        (
            p.x / self.canvas.width * self.width as f64,
            p.y / self.canvas.height * self.height as f64,
        )
    }

    fn on_grid(&self, (x, y): (f64, f64)) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }

    /// Slide `p` along the line towards `q` until it lies on the grid rectangle
    fn pull_onto_grid(&self, mut p: (f64, f64), q: (f64, f64)) -> (f64, f64) {
        let (w, h) = (self.width as f64, self.height as f64);
        let x = p.0.clamp(0.0, w);
        if x != p.0 {
            p.1 += (x - p.0) * ((q.1 - p.1) / (q.0 - p.0));
            p.0 = x;
        }
        let y = p.1.clamp(0.0, h);
        if y != p.1 {
            p.0 += (y - p.1) * ((q.0 - p.0) / (q.1 - p.1));
            p.1 = y;
        }
        p
    }

    /// Clip a cell-space segment to the grid rectangle, `None` when nothing of it is visible
    fn clip(&self, a: (f64, f64), b: (f64, f64)) -> Option<((f64, f64), (f64, f64))> {
        if ![a.0, a.1, b.0, b.1].iter().all(|v| v.is_finite()) {
            return None;
        }

        let (w, h) = (self.width as f64, self.height as f64);
        if (a.0 < 0.0 && b.0 < 0.0)
            || (a.0 > w && b.0 > w)
            || (a.1 < 0.0 && b.1 < 0.0)
            || (a.1 > h && b.1 > h)
        {
            return None;
        }

        let start = self.pull_onto_grid(a, b);
        let end = self.pull_onto_grid(b, a);
        let eps = 1e-9;
        let inside = |(x, y): (f64, f64)| {
            x >= -eps && y >= -eps && x <= w + eps && y <= h + eps
        };
        // a segment passing outside a corner ends up off the rectangle or non-finite
        (inside(start) && inside(end)).then_some((start, end))
    }

    fn plot(&mut self, x: i64, y: i64, character: char) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if self.char_buffer[idx] != VERTEX {
            self.char_buffer[idx] = character;
        }
    }

    /// Rasterize one segment with Bresenham's algorithm after clipping it to the grid
    pub fn draw_line(&mut self, from: &Point2<f64>, to: &Point2<f64>) {
        let (a, b) = (self.to_cell(from), self.to_cell(to));
        let Some((start, end)) = self.clip(a, b) else {
            return;
        };

        let (mut x0, mut y0) = (start.0.floor() as i64, start.1.floor() as i64);
        let (x1, y1) = (end.0.floor() as i64, end.1.floor() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x0, y0, TRAIL);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }

        for endpoint in [a, b] {
            if self.on_grid(endpoint) {
                self.plot(endpoint.0.floor() as i64, endpoint.1.floor() as i64, VERTEX);
            }
        }
    }

    /// One row of the grid as text
    pub fn row(&self, y: usize) -> String {
        self.char_buffer[y * self.width..(y + 1) * self.width]
            .iter()
            .collect()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let c = self.char_buffer[y * self.width + x];
                let color = match c {
                    VERTEX => Color::Cyan,
                    TRAIL => Color::White,
                    _ => Color::DarkGrey,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line() {
        let mut renderer = LineRenderer::new(10, 5, CanvasSize::new(100.0, 50.0));
        renderer.draw_line(&Point2::new(0.0, 20.0), &Point2::new(95.0, 20.0));
        assert_eq!(renderer.row(2), "o********o");
        assert_eq!(renderer.row(1), "          ");
    }

    #[test]
    fn test_diagonal_line_endpoints() {
        let mut renderer = LineRenderer::new(4, 4, CanvasSize::new(4.0, 4.0));
        renderer.draw_line(&Point2::new(0.5, 0.5), &Point2::new(3.5, 3.5));
        assert_eq!(renderer.row(0), "o   ");
        assert_eq!(renderer.row(1), " *  ");
        assert_eq!(renderer.row(2), "  * ");
        assert_eq!(renderer.row(3), "   o");
    }

    #[test]
    fn test_off_grid_cells_skipped() {
        let mut renderer = LineRenderer::new(4, 2, CanvasSize::new(4.0, 2.0));
        renderer.draw_line(&Point2::new(-10.0, 0.5), &Point2::new(1.5, 0.5));
        assert_eq!(renderer.row(0), "*o  ");
        renderer.clear();
        assert_eq!(renderer.row(0), "    ");
    }

    #[test]
    fn test_far_off_grid_segment_is_clipped() {
        let mut renderer = LineRenderer::new(4, 2, CanvasSize::new(4.0, 2.0));
        renderer.draw_line(&Point2::new(-1e300, 0.5), &Point2::new(1e300, 0.5));
        assert_eq!(renderer.row(0), "****");
        assert_eq!(renderer.row(1), "    ");

        renderer.clear();
        renderer.draw_line(&Point2::new(-1e9, -1e9), &Point2::new(-5e8, 1e9));
        assert_eq!(renderer.row(0), "    ");
        assert_eq!(renderer.row(1), "    ");
    }

    #[test]
    fn test_non_finite_segment_skipped() {
        let mut renderer = LineRenderer::new(4, 2, CanvasSize::new(4.0, 2.0));
        renderer.draw_line(&Point2::new(f64::NAN, 0.5), &Point2::new(1.5, 0.5));
        renderer.draw_line(&Point2::new(0.5, 0.5), &Point2::new(f64::INFINITY, 0.5));
        assert_eq!(renderer.row(0), "    ");
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let mut renderer = LineRenderer::new(3, 2, CanvasSize::new(3.0, 2.0));
        renderer.draw_line(&Point2::new(0.0, 0.0), &Point2::new(2.0, 0.0));
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('o'));
        assert!(text.contains('*'));
    }
}
