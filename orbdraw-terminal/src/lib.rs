//! Terminal front end for orbdraw: configuration, CLI plumbing and a live character canvas
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::debug;
use nalgebra::Point2;
use orbdraw_core::{CanvasSize, SegmentSink};
use std::io::{self, stdout, Write};

pub mod config;
pub mod renderer;

pub use config::{OrbdrawConfig, OutputConfig, OutputFormat};
pub use renderer::LineRenderer;

/// Live terminal canvas. Segments are rasterized as they arrive; `finish` shows the
/// drawing in the alternate screen until Q or Esc is pressed.
pub struct TerminalApp {
    segments: Vec<(Point2<f64>, Point2<f64>)>,
    renderer: LineRenderer,
    title: String,
}

impl TerminalApp {
    pub fn new(canvas: CanvasSize, title: impl Into<String>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            segments: Vec::new(),
            // top row is reserved for the status line
            renderer: LineRenderer::new(width as usize, height.saturating_sub(1) as usize, canvas),
            title: title.into(),
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;
        loop {
            match event::read()? {
                Event::Key(KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    ..
                }) => return Ok(()),
                Event::Resize(width, height) => {
                    debug!("terminal resized to {}x{}", width, height);
                    self.renderer
                        .resize(width as usize, height.saturating_sub(1) as usize);
                    for (from, to) in &self.segments {
                        self.renderer.draw_line(from, to);
                    }
                    self.render()?;
                }
                _ => {}
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | {} segments | Q/Esc=Quit",
                self.title,
                self.segments.len()
            )),
            ResetColor,
            cursor::MoveTo(0, 1)
        )?;

        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}

impl SegmentSink for TerminalApp {
    fn draw_segment(&mut self, from: &Point2<f64>, to: &Point2<f64>) -> orbdraw_core::Result<()> {
        self.segments.push((*from, *to));
        self.renderer.draw_line(from, to);
        Ok(())
    }

    fn finish(&mut self) -> orbdraw_core::Result<()> {
        self.run()?;
        Ok(())
    }
}
