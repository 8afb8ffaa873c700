//! Minimal SVG document output
use nalgebra::Point2;
use std::io::Write;

use crate::error::Result;
use crate::geometry::CanvasSize;
use crate::sink::SegmentSink;

/// Streams a drawing as an SVG document with one `<line>` per segment
pub struct SvgWriter<W: Write> {
    writer: W,
    canvas: CanvasSize,
    title: Option<String>,
    description: Option<String>,
    stroke: String,
    stroke_width: f64,
    header_written: bool,
}

impl<W: Write> SvgWriter<W> {
    pub fn new(writer: W, canvas: CanvasSize) -> Self {
        Self {
            writer,
            canvas,
            title: None,
            description: None,
            stroke: "black".to_string(),
            stroke_width: 1.0,
            header_written: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stroke(mut self, colour: impl Into<String>, width: f64) -> Self {
        self.stroke = colour.into();
        self.stroke_width = width;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_header(&mut self) -> Result<()> {
        writeln!(self.writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            self.writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{}" height="{}">"#,
            self.canvas.width, self.canvas.height
        )?;
        if let Some(title) = &self.title {
            writeln!(self.writer, "  <title>{}</title>", escape(title))?;
        }
        if let Some(description) = &self.description {
            writeln!(
                self.writer,
                "  <description>{}</description>",
                escape(description)
            )?;
        }
        self.header_written = true;
        Ok(())
    }
}

impl<W: Write> SegmentSink for SvgWriter<W> {
    fn draw_segment(&mut self, from: &Point2<f64>, to: &Point2<f64>) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }
        writeln!(
            self.writer,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            escape(&self.stroke),
            self.stroke_width
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if !self.header_written {
            self.write_header()?;
        }
        writeln!(self.writer, "</svg>")?;
        self.writer.flush()?;
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::draw_path;

    fn render(points: &[Point2<f64>], svg: SvgWriter<Vec<u8>>) -> String {
        let mut svg = svg;
        draw_path(points, &mut svg).unwrap();
        String::from_utf8(svg.into_inner()).unwrap()
    }

    #[test]
    fn test_document_structure() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 5.0),
            Point2::new(20.0, 0.0),
            Point2::new(30.0, 5.5),
        ];
        let text = render(&points, SvgWriter::new(Vec::new(), CanvasSize::new(300.0, 200.0)));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("<?xml"));
        assert_eq!(
            lines[1],
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="300" height="200">"#
        );
        assert_eq!(text.matches("<line ").count(), 3);
        assert_eq!(*lines.last().unwrap(), "</svg>");
        assert!(!text.contains("<title>"));
        assert!(text.contains(r#"x1="20" y1="0" x2="30" y2="5.5""#));
    }

    #[test]
    fn test_title_and_description_escaped() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)];
        let svg = SvgWriter::new(Vec::new(), CanvasSize::default())
            .with_title("LEO <400 km>")
            .with_description("a & b")
            .with_stroke("#ff0000", 0.5);
        let text = render(&points, svg);

        assert!(text.contains("<title>LEO &lt;400 km&gt;</title>"));
        assert!(text.contains("<description>a &amp; b</description>"));
        assert!(text.contains(r##"stroke="#ff0000" stroke-width="0.5""##));
    }
}
